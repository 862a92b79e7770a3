mod helpers;
mod login;
mod logout;
mod protected;
mod register;

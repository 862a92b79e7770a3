pub const API_KEY_HEADER: &str = "X-Api-Key";

pub mod env {
    pub const CONFIG_FILE_ENV_VAR: &str = "GATEHOUSE_CONFIG";
    pub const ENV_PREFIX: &str = "GATEHOUSE";
    pub const ENV_SEPARATOR: &str = "__";
}

pub const DEFAULT_CONFIG_FILE: &str = "config/gatehouse";

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";
    pub const SESSION_FILE: &str = "gatehouse-session.json";
    pub const PROFILE_COLLECTION: &str = "users";

    pub mod identity {
        use std::time::Duration;

        pub const TIMEOUT: Duration = Duration::from_secs(10);
    }
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";

    pub mod identity {
        use std::time::Duration;

        pub const TIMEOUT: Duration = Duration::from_millis(200);
    }
}

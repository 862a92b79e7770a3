use gatehouse_core::{Email, UserProfile};
use serde::{Deserialize, Serialize};

/// Wire shape shared by the profile document and the persisted session record.
///
/// The name is written as `userName` to match documents created by earlier
/// clients; `displayName` is accepted on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDocument {
    pub id: String,
    pub email: String,
    #[serde(alias = "displayName")]
    pub user_name: String,
}

impl From<&UserProfile> for ProfileDocument {
    fn from(profile: &UserProfile) -> Self {
        Self {
            id: profile.id().to_owned(),
            email: profile.email().as_str().to_owned(),
            user_name: profile.display_name().to_owned(),
        }
    }
}

impl TryFrom<ProfileDocument> for UserProfile {
    type Error = String;

    fn try_from(document: ProfileDocument) -> Result<Self, Self::Error> {
        if document.id.trim().is_empty() {
            return Err("missing id".to_string());
        }
        let email = Email::parse(&document.email).map_err(|e| e.to_string())?;
        Ok(UserProfile::new(document.id, email, document.user_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_uses_user_name_key() {
        let profile = UserProfile::new("uid-1", Email::parse("x@y.com").unwrap(), "Xavier");
        let value = serde_json::to_value(ProfileDocument::from(&profile)).unwrap();
        assert_eq!(
            value,
            json!({"id": "uid-1", "email": "x@y.com", "userName": "Xavier"})
        );
    }

    #[test]
    fn test_document_without_id_is_rejected() {
        let document = ProfileDocument {
            id: " ".into(),
            email: "x@y.com".into(),
            user_name: "Xavier".into(),
        };
        assert!(UserProfile::try_from(document).is_err());
    }

    #[test]
    fn test_display_name_alias_is_accepted() {
        let document: ProfileDocument =
            serde_json::from_value(json!({"id": "u", "email": "x@y.com", "displayName": "X"}))
                .unwrap();
        assert_eq!(document.user_name, "X");
    }
}

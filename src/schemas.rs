//! Request and response bodies for the clients API, with validation.

use crate::models::Client;
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct ClientCreate {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    #[validate(email, length(max = 320))]
    pub email: Option<String>,
}

/// Partial update. The outer `Option` records whether the field was sent at all, the
/// inner one whether it was `null`.
#[derive(Clone, Debug, Default, Deserialize, Validate)]
#[validate(schema(function = "name_not_null"))]
pub struct ClientUpdate {
    #[serde(default, deserialize_with = "present")]
    #[validate(length(min = 1, max = 200))]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[validate(email, length(max = 320))]
    pub email: Option<Option<String>>,
}

impl ClientUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientView {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
}

impl From<Client> for ClientView {
    fn from(c: Client) -> Self {
        ClientView {
            id: c.id,
            name: c.name,
            email: c.email,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct HelloParams {
    pub name: String,
}

/// `name` is NOT NULL in the store, so an explicit `null` cannot be applied.
fn name_not_null(update: &ClientUpdate) -> Result<(), ValidationError> {
    if matches!(update.name, Some(None)) {
        let mut err = ValidationError::new("name_null");
        err.message = Some("name may not be null".into());
        return Err(err);
    }
    Ok(())
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(json: &str) -> ClientUpdate {
        serde_json::from_str(json).unwrap()
    }

    fn create(name: &str, email: Option<&str>) -> ClientCreate {
        ClientCreate {
            name: name.to_string(),
            email: email.map(str::to_string),
        }
    }

    #[test]
    fn update_distinguishes_omitted_null_and_value() {
        let u = update(r#"{"name": "Ada"}"#);
        assert_eq!(u.name, Some(Some("Ada".to_string())));
        assert_eq!(u.email, None);

        let u = update(r#"{"email": null}"#);
        assert_eq!(u.name, None);
        assert_eq!(u.email, Some(None));

        let u = update(r#"{"email": "ada@example.com"}"#);
        assert_eq!(u.email, Some(Some("ada@example.com".to_string())));

        assert!(update("{}").is_empty());
    }

    #[test]
    fn update_rejects_null_name() {
        assert!(update(r#"{"name": null}"#).validate().is_err());
    }

    #[test]
    fn update_checks_supplied_values() {
        assert!(update(r#"{"name": ""}"#).validate().is_err());
        assert!(update(r#"{"email": "nope"}"#).validate().is_err());
        assert!(update(r#"{"name": "Ada", "email": "ada@example.com"}"#).validate().is_ok());
    }

    #[test]
    fn update_with_null_email_is_valid() {
        assert!(update(r#"{"email": null}"#).validate().is_ok());
        assert!(update("{}").validate().is_ok());
    }

    #[test]
    fn create_requires_name() {
        assert!(serde_json::from_str::<ClientCreate>(r#"{"email": "a@b.io"}"#).is_err());
        let c: ClientCreate = serde_json::from_str(r#"{"name": "Ada"}"#).unwrap();
        assert_eq!(c.email, None);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn name_length_bounds() {
        assert!(create("", None).validate().is_err());
        assert!(create("a", None).validate().is_ok());
        assert!(create(&"x".repeat(200), None).validate().is_ok());
        assert!(create(&"x".repeat(201), None).validate().is_err());
        // counted in characters, not bytes
        assert!(create(&"é".repeat(200), None).validate().is_ok());
    }

    #[test]
    fn email_syntax() {
        for ok in ["ada@example.com", "first.last+tag@sub.example.org", "x_y@a-b.io"] {
            assert!(create("Ada", Some(ok)).validate().is_ok(), "{ok}");
        }
        for bad in ["", "ada", "ada@", "@example.com", "a b@example.com", "ada@@example.com"] {
            assert!(create("Ada", Some(bad)).validate().is_err(), "{bad}");
        }
    }

    #[test]
    fn view_serializes_null_email() {
        let view = ClientView::from(Client {
            id: 3,
            name: "Ada".into(),
            email: None,
        });
        assert_eq!(
            serde_json::to_value(&view).unwrap(),
            serde_json::json!({"id": 3, "name": "Ada", "email": null})
        );
    }
}

use serde::Deserialize;
use validator::Validate;

use crate::domain::user::{NewUser, UpdateUser};

#[derive(Debug, Deserialize, Validate)]
pub struct AddUserForm {
    #[validate(length(min = 1, message = "name is required"))]
    pub full_name: String,
    #[validate(email(message = "a valid email is required"))]
    pub email: String,
    pub msisdn: Option<String>,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    pub role_id: Option<String>,
    #[validate(length(min = 1, message = "a client selection is required"))]
    pub client_id: String,
}

impl AddUserForm {
    pub fn into_new_user(self) -> NewUser {
        NewUser::new(
            self.full_name,
            self.email,
            self.msisdn,
            self.password,
            self.role_id,
            self.client_id,
        )
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserForm {
    #[validate(length(min = 1, message = "name is required"))]
    pub full_name: String,
    #[validate(email(message = "a valid email is required"))]
    pub email: Option<String>,
    pub msisdn: Option<String>,
    pub role_id: Option<String>,
}

impl UpdateUserForm {
    pub fn into_update_user(self) -> UpdateUser {
        UpdateUser::new(self.full_name, self.email, self.msisdn, self.role_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> AddUserForm {
        AddUserForm {
            full_name: "Jordan Ops".to_string(),
            email: "jordan@acme.cd".to_string(),
            msisdn: None,
            password: "hunter2hunter2".to_string(),
            role_id: Some("3".to_string()),
            client_id: "7".to_string(),
        }
    }

    #[test]
    fn test_add_user_form_validation() {
        assert!(valid_form().validate().is_ok());

        let mut short_password = valid_form();
        short_password.password = "short".to_string();
        assert!(short_password.validate().is_err());

        let mut no_client = valid_form();
        no_client.client_id = String::new();
        assert!(no_client.validate().is_err());
    }

    #[test]
    fn test_new_user_normalizes_but_keeps_password_verbatim() {
        let mut form = valid_form();
        form.password = "  spaced pass  ".to_string();
        let new_user = form.into_new_user();
        assert_eq!(new_user.password, "  spaced pass  ");
        assert_eq!(new_user.email, "jordan@acme.cd");
    }
}

use serde::Deserialize;
use validator::Validate;

use crate::domain::client::{NewClient, UpdateClient};

#[derive(Debug, Deserialize, Validate)]
pub struct AddClientForm {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "a valid email is required"))]
    pub email: String,
    pub msisdn: Option<String>,
    pub account_type: Option<String>,
    #[validate(length(min = 2, message = "a country selection is required"))]
    pub country_code: String,
    pub address: Option<String>,
}

impl AddClientForm {
    pub fn into_new_client(self) -> NewClient {
        NewClient::new(
            self.name,
            self.email,
            self.msisdn,
            self.account_type,
            self.country_code,
            self.address,
        )
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateClientForm {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "a valid email is required"))]
    pub email: Option<String>,
    pub msisdn: Option<String>,
    pub account_type: Option<String>,
    pub country_code: Option<String>,
    pub address: Option<String>,
}

impl UpdateClientForm {
    pub fn into_update_client(self) -> UpdateClient {
        UpdateClient::new(
            self.name,
            self.email,
            self.msisdn,
            self.account_type,
            self.country_code,
            self.address,
        )
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct TopUpForm {
    #[validate(range(min = 0.01, message = "amount must be greater than zero"))]
    pub amount: f64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct BillingRateForm {
    #[validate(range(min = 0.0, message = "rate cannot be negative"))]
    pub rate: f64,
}

//! crates/learnhub_core/src/checkout.rs
//!
//! The checkout form. Nothing is charged; a valid submission only sends the
//! learner on to the purchased-courses view.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::Catalog;
use crate::ports::{FieldError, Navigator, PortError, PortResult};

/// The purchased-courses view, flagged so it can show a payment confirmation.
pub const PURCHASED_AFTER_PAYMENT_PATH: &str = "/learner/courses/purchased?from=payment";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub payment_method: String,
}

impl CheckoutForm {
    /// Reports every blank field at once.
    pub fn validate(&self) -> PortResult<()> {
        let required = [
            ("name", &self.name, "Full name is required"),
            ("phone", &self.phone, "Phone number is required"),
            ("address", &self.address, "Address is required"),
            ("paymentMethod", &self.payment_method, "Payment method is required"),
        ];
        let errors: Vec<FieldError> = required
            .into_iter()
            .filter(|(_, value, _)| value.trim().is_empty())
            .map(|(field, _, message)| FieldError::new(field, message))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(PortError::Validation(errors))
        }
    }
}

/// What a successful checkout hands back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Receipt {
    pub course_id: String,
    pub course_title: String,
    pub price: f64,
    pub buyer_name: String,
}

/// Validates the form for a catalog course and redirects on success.
pub fn submit(
    catalog: &Catalog,
    course_id: &str,
    form: &CheckoutForm,
    navigator: &dyn Navigator,
) -> PortResult<Receipt> {
    let course = catalog.get_course(course_id)?;
    form.validate()?;

    info!("Checkout accepted for course '{}'", course.id);
    navigator.redirect(PURCHASED_AFTER_PAYMENT_PATH);

    Ok(Receipt {
        course_id: course.id.clone(),
        course_title: course.title.clone(),
        price: course.price,
        buyer_name: form.name.trim().to_string(),
    })
}

pub mod doc;
pub mod error;
/// Dispatch handlers for the Twilio SMS and WhatsApp endpoints.
pub mod handlers;
/// Wire-level Twilio REST client.
pub mod logic;
pub mod routes;
/// Provider adapter implementations for the normalized messaging contract.
pub mod service;

pub use error::TwilioError;
pub use logic::TwilioClient;
pub use service::{TwilioSmsService, TwilioWhatsAppService};

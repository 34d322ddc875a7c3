pub mod cache;
pub mod config;
pub mod data;
pub mod exception;
pub mod field;
pub mod form;
pub mod handler;
pub mod param;
pub mod reconcile;
pub mod token;

pub use cache::{Cache, MemoryCache, Sweeper};
pub use config::Config;
pub use data::FormData;
pub use exception::Exception;
pub use form::{Field, Form, Html};
pub use handler::FormHandler;
pub use param::{FormMethod, OptionalBool, TextDirection, TOKEN_FIELD_NAME};
pub use reconcile::reconcile;

// Display formatting helpers: dates, text and random identifiers

pub mod date;
pub mod random;
pub mod text;

pub use date::{format_date, parse_timestamp, DateFormatter, IntoInstant, MillisPadding};
pub use random::{random_int, random_token, TOKEN_ALPHABET};
pub use text::{escape_text, title_case, zero_pad};

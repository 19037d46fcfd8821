mod error;
mod parser;
mod schema;

pub use error::{ParseError, SchemaError};
pub use parser::{NESTED_BLOCK_VALUE, parse_file, parse_str};
pub use schema::{ProviderSchema, SchemaSource, TerraformCli};

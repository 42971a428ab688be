mod record;

use proc_macro::TokenStream;

/// Derive `scoreline::Record` for a struct with named fields.
///
/// ```ignore
/// #[derive(Clone, Serialize, Deserialize, Record)]
/// #[record(collection = "teams")]
/// pub struct Team {
///     #[record(id)]
///     pub id: u64,
///     pub name: String,
///     #[record(soft_delete)]
///     pub deleted_at: Option<Timestamp>,
/// }
/// ```
///
/// - `collection` defaults to the snake_case struct name plus `s`.
/// - The id field defaults to a field named `id` and must be a `u64`.
/// - A `#[record(soft_delete)]` field (an `Option<Timestamp>`) makes the
///   record soft-deletable. Without one, deletes are physical.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive_record(input)
}

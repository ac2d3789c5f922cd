/// Binary asset storage
///
/// Images and PDFs uploaded through the admin forms are pushed to an external
/// object store; the database only keeps the resulting public URL.
///
/// # Modules
///
/// - `client`: `ObjectStorage` trait and the Supabase Storage REST client
/// - `upload`: The upload helper used by form handlers
///
/// # Example
///
/// ```no_run
/// use folio_shared::storage::client::SupabaseStorage;
/// use folio_shared::storage::upload::{store_upload, UploadFolder, UploadedFile};
///
/// # async fn example(file: UploadedFile) {
/// let storage = SupabaseStorage::new(
///     reqwest::Client::new(),
///     "https://project.supabase.co",
///     "service-key",
///     "portfolio",
/// );
///
/// if let Some(url) = store_upload(&storage, Some(&file), UploadFolder::Projects).await {
///     println!("Stored at {}", url);
/// }
/// # }
/// ```

pub mod client;
pub mod upload;

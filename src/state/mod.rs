mod archive;
mod persistence;
mod store;

pub use archive::ReportArchive;
pub use persistence::{load_document, save_document};
pub use store::Store;

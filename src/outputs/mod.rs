//! Output generation for scraped articles.
//!
//! # Submodules
//!
//! - [`csv_file`]: Writes the kept articles of a run to a dated CSV file
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── elpais_2024_03_05_articles.csv
//! └── eluniversal_2024_03_05_articles.csv
//! ```

pub mod csv_file;

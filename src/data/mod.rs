/// Data layer: loading, caching, and the streams transform pipeline.
///
/// Architecture:
/// ```text
///  streams .csv (semicolon-delimited)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  split header rows, coerce dates/counts → Dataset
///   └──────────┘
///        │            ┌───────┐
///        ├──────────▶ │ cache │  memoized per path + mtime
///        ▼            └───────┘
///   ┌──────────────┐
///   │   Dataset     │  ArtistIndex, typed DataRows
///   └──────────────┘
///        │   Selection (artists, years, mode)
///        ▼
///   ┌──────────┐
///   │ pipeline  │  combine → normalize → year filter → TidyRecords
///   └──────────┘
///        │
///        ▼
///   plot / table / export
/// ```

pub mod cache;
pub mod error;
pub mod export;
pub mod loader;
pub mod model;
pub mod pipeline;

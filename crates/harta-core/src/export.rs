use crate::{Result, SearchKind, SearchResults};
use csv::Writer;
use std::io;
use std::path::Path;

const HEADER: [&str; 5] = ["Kind", "Price", "Area", "Location", "URL"];

/// Write sale listings, then rent listings, one row each.
pub fn write_csv<W: io::Write>(writer: W, results: &SearchResults) -> Result<usize> {
    let mut writer = Writer::from_writer(writer);
    writer.write_record(HEADER)?;

    let mut rows = 0;
    for kind in [SearchKind::Sale, SearchKind::Rent] {
        for listing in results.listings(kind) {
            writer.write_record([
                kind.to_string().as_str(),
                listing.price.as_str(),
                listing.area.as_str(),
                listing.location.as_str(),
                listing.url.as_str(),
            ])?;
            rows += 1;
        }
    }
    writer.flush()?;
    Ok(rows)
}

pub fn export_csv(path: impl AsRef<Path>, results: &SearchResults) -> Result<usize> {
    let file = std::fs::File::create(path)?;
    write_csv(file, results)
}

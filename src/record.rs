use crate::Error;
use serde::Deserialize;
use std::path::Path;

/// The two-level classification of a record. `"1"` is the only value that maps
/// to [Tier::Single]; every other value silently falls back to [Tier::Double],
/// matching the table format this tool consumes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Tier {
    Single,
    Double,
}

impl Tier {
    /// The mark(s) printed near the bottom edge of the card
    pub fn symbol(&self) -> &'static str {
        match self {
            Tier::Single => "°",
            Tier::Double => "° °",
        }
    }
}

impl From<&str> for Tier {
    fn from(value: &str) -> Self {
        if value == "1" {
            Tier::Single
        } else {
            Tier::Double
        }
    }
}

impl<'de> Deserialize<'de> for Tier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Tier::from(value.as_str()))
    }
}

/// One row of the input table. Loaded once and never mutated afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct Record {
    #[serde(rename = "Artist")]
    pub artist: String,
    #[serde(rename = "Title")]
    pub title: String,
    /// Kept as text; the input may carry years like "1984" or "ca. 1970"
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Tier")]
    pub tier: Tier,
    #[serde(rename = "URL")]
    pub url: String,
}

/// Read all records from a semicolon-separated table. The header row must
/// contain the columns `Artist`, `Title`, `Year`, `Tier` and `URL` (in any
/// order); surrounding whitespace is trimmed from headers and cells.
pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<Record>, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: Record = row?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn tier_one_is_single_everything_else_double() {
        assert_eq!(Tier::from("1"), Tier::Single);
        assert_eq!(Tier::from("2"), Tier::Double);
        assert_eq!(Tier::from("3"), Tier::Double);
        assert_eq!(Tier::from("gold"), Tier::Double);
        assert_eq!(Tier::from(""), Tier::Double);
    }

    #[test]
    fn tier_symbols() {
        assert_eq!(Tier::Single.symbol(), "°");
        assert_eq!(Tier::Double.symbol(), "° °");
    }

    #[test]
    fn reads_and_trims_a_table() {
        let mut file = tempfile::NamedTempFile::new().expect("can create temp file");
        writeln!(file, "Artist; Title; Year; Tier; URL").unwrap();
        writeln!(file, "Queen ; Bohemian Rhapsody ;1975; 1 ; http://a.example/1").unwrap();
        writeln!(file, "Nena;99 Luftballons;1983;2;http://a.example/2").unwrap();

        let records = read_records(file.path()).expect("table parses");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].artist, "Queen");
        assert_eq!(records[0].title, "Bohemian Rhapsody");
        assert_eq!(records[0].year, "1975");
        assert_eq!(records[0].tier, Tier::Single);
        assert_eq!(records[0].url, "http://a.example/1");
        assert_eq!(records[1].tier, Tier::Double);
    }

    #[test]
    fn column_order_does_not_matter() {
        let mut file = tempfile::NamedTempFile::new().expect("can create temp file");
        writeln!(file, "URL;Tier;Year;Title;Artist").unwrap();
        writeln!(file, "http://a.example/x;1;1999;Song;Band").unwrap();

        let records = read_records(file.path()).expect("table parses");
        assert_eq!(records[0].artist, "Band");
        assert_eq!(records[0].url, "http://a.example/x");
    }

    #[test]
    fn missing_column_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().expect("can create temp file");
        writeln!(file, "Artist;Title;Year;URL").unwrap();
        writeln!(file, "Band;Song;1999;http://a.example/x").unwrap();

        assert!(read_records(file.path()).is_err());
    }
}

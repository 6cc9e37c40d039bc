use crate::models::RawRecord;
use anyhow::Result;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Load tabular records from a CSV file with a `date,key,value` header.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Vec<RawRecord>> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.deserialize() {
        let rec: RawRecord = rec?;
        out.push(rec);
    }
    Ok(out)
}

/// Save records as CSV with header.
pub fn save_csv<P: AsRef<Path>>(records: &[RawRecord], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("date", "key", "value"))?;
    for r in records {
        wtr.serialize((&r.date, &r.key, &r.value))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Load records from a JSON array of `{date, key, value}` objects.
pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Vec<RawRecord>> {
    let f = File::open(path)?;
    let records = serde_json::from_reader(f)?;
    Ok(records)
}

/// Save records as pretty JSON array.
pub fn save_json<P: AsRef<Path>>(records: &[RawRecord], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(records)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn csv_and_json_round_trip() {
        let dir = tempdir().unwrap();
        let csvp = dir.path().join("x.csv");
        let jsonp = dir.path().join("x.json");
        let recs = vec![
            RawRecord::new("2020-01-01", "A", "1"),
            RawRecord::new("2020-02-01", "A", "2.5"),
        ];
        save_csv(&recs, &csvp).unwrap();
        save_json(&recs, &jsonp).unwrap();
        assert_eq!(load_csv(&csvp).unwrap(), recs);
        assert_eq!(load_json(&jsonp).unwrap(), recs);
    }
}

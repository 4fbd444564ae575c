#![forbid(unsafe_code)]

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::RawHierarchy;

pub fn parse_json(json: &str) -> Result<RawHierarchy> {
    Ok(serde_json::from_str(json)?)
}

pub fn parse_reader<R: Read>(reader: R) -> Result<RawHierarchy> {
    Ok(serde_json::from_reader(BufReader::new(reader))?)
}

pub fn parse_path(path: &Path) -> Result<RawHierarchy> {
    if !path.is_file() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }
    let file = File::open(path)?;
    parse_reader(file)
}

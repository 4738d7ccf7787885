// uces.rs - UCE locus table loader (CSV: Name,Start,Stop)

use crate::data::locus::Locus;
use std::io::Read;
use std::path::Path;

/// Load UCE loci from a CSV file with `Name`, `Start` and `Stop` columns.
///
/// Positions are 0-based and `Stop` is inclusive, so a row `u1,0,99` becomes
/// the locus `[0, 100)`.
pub fn load_uces(path: &Path) -> Result<Vec<Locus>, String> {
    let file = std::fs::File::open(path)
        .map_err(|e| format!("Failed to open UCE file {}: {}", path.display(), e))?;
    read_uces(file).map_err(|e| format!("{}: {}", path.display(), e))
}

pub fn read_uces<R: Read>(reader: R) -> Result<Vec<Locus>, String> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| format!("Failed to read UCE header: {}", e))?
        .clone();

    let mut name_idx = None;
    let mut start_idx = None;
    let mut stop_idx = None;
    for (i, column) in headers.iter().enumerate() {
        match column.to_lowercase().as_str() {
            "name" => name_idx = Some(i),
            "start" => start_idx = Some(i),
            "stop" => stop_idx = Some(i),
            other => return Err(format!("Unknown UCE column '{}'", other)),
        }
    }
    let (name_idx, start_idx, stop_idx) = match (name_idx, start_idx, stop_idx) {
        (Some(n), Some(s), Some(e)) => (n, s, e),
        _ => return Err("UCE header must contain Name, Start and Stop".to_string()),
    };

    let mut loci = Vec::new();
    for (row, record) in rdr.records().enumerate() {
        let line = row + 2;
        let record = record.map_err(|e| format!("Invalid UCE row at line {}: {}", line, e))?;
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let position = |idx: usize, label: &str| -> Result<usize, String> {
            field(idx)
                .parse::<usize>()
                .map_err(|_| format!("Invalid {} '{}' at line {}", label, field(idx), line))
        };
        let start = position(start_idx, "Start")?;
        let stop = position(stop_idx, "Stop")?;
        if stop < start {
            return Err(format!("Stop {} before Start {} at line {}", stop, start, line));
        }
        loci.push(Locus::new(field(name_idx), start, stop + 1));
    }
    Ok(loci)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_uces() {
        let input = "Name,Start,Stop\nuce-1,0,99\nuce-2, 100, 249\n";
        let loci = read_uces(input.as_bytes()).unwrap();
        assert_eq!(
            loci,
            vec![Locus::new("uce-1", 0, 100), Locus::new("uce-2", 100, 250)]
        );
    }

    #[test]
    fn test_columns_in_any_order() {
        let input = "stop,name,start\n99,u1,0\n";
        let loci = read_uces(input.as_bytes()).unwrap();
        assert_eq!(loci, vec![Locus::new("u1", 0, 100)]);
    }

    #[test]
    fn test_bad_tables() {
        assert!(read_uces("Name,Start,End\nu1,0,9\n".as_bytes()).is_err());
        assert!(read_uces("Name,Start\nu1,0\n".as_bytes()).is_err());
        assert!(read_uces("Name,Start,Stop\nu1,x,9\n".as_bytes()).is_err());
        assert!(read_uces("Name,Start,Stop\nu1,10,9\n".as_bytes()).is_err());
    }
}

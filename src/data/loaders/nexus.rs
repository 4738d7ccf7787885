// nexus.rs - NEXUS loader for DATA/CHARACTERS and SETS blocks

use crate::data::alignment::Alignment;
use crate::data::locus::Locus;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;

const DNA_ALPHABET: &str = "ATGC";
const RNA_ALPHABET: &str = "AUGC";
const PROTEIN_ALPHABET: &str = "ARNDCQEGHILKMFPSTWYV";

/// Contents of a NEXUS file relevant to the window search
#[derive(Debug, Clone)]
pub struct NexusFile {
    pub alignment: Alignment,
    pub datatype: String,
    pub gap: u8,
    pub missing: u8,
    /// Character sets as half-open loci, in file order
    pub charsets: Vec<Locus>,
}

impl NexusFile {
    /// Symbols counted by the metrics, derived from DATATYPE
    pub fn alphabet(&self) -> Result<&'static str, String> {
        alphabet_for_datatype(&self.datatype)
    }
}

pub fn alphabet_for_datatype(datatype: &str) -> Result<&'static str, String> {
    match datatype.to_uppercase().as_str() {
        "DNA" | "NUCLEOTIDE" => Ok(DNA_ALPHABET),
        "RNA" => Ok(RNA_ALPHABET),
        "PROTEIN" => Ok(PROTEIN_ALPHABET),
        other => Err(format!("Unsupported NEXUS datatype: {}", other)),
    }
}

/// Load a NEXUS file from disk
pub fn load_nexus(path: &Path) -> Result<NexusFile, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read NEXUS file {}: {}", path.display(), e))?;
    parse_nexus(&content).map_err(|e| format!("{}: {}", path.display(), e))
}

/// Lines between `BEGIN <name>;` and `END;` for every block, keyed by upper-cased name
fn split_blocks(content: &str) -> BTreeMap<String, Vec<String>> {
    let mut blocks: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut current: Option<String> = None;

    for raw in content.lines() {
        let line = raw.trim();
        let upper = line.to_uppercase();
        if let Some(name) = upper.strip_prefix("BEGIN ") {
            let name = name.trim_end_matches(';').trim().to_string();
            blocks.entry(name.clone()).or_default();
            current = Some(name);
        } else if upper.starts_with("END;") || upper.starts_with("ENDBLOCK;") {
            current = None;
        } else if let Some(name) = &current {
            if !line.is_empty() {
                if let Some(lines) = blocks.get_mut(name) {
                    lines.push(line.to_string());
                }
            }
        }
    }
    blocks
}

/// `KEY=value` pairs of a command line, keys upper-cased
fn key_values(re: &Regex, line: &str) -> BTreeMap<String, String> {
    re.captures_iter(line)
        .map(|c| (c[1].to_uppercase(), c[2].to_string()))
        .collect()
}

fn parse_usize(values: &BTreeMap<String, String>, key: &str) -> Result<Option<usize>, String> {
    values
        .get(key)
        .map(|v| {
            v.parse::<usize>()
                .map_err(|_| format!("Invalid {} value '{}'", key, v))
        })
        .transpose()
}

/// Parse NEXUS text into an alignment and its character sets
pub fn parse_nexus(content: &str) -> Result<NexusFile, String> {
    let blocks = split_blocks(content);
    let key_value = Regex::new(r"(\w+)\s*=\s*([^\s;]+)")
        .map_err(|e| format!("Invalid key=value regex: {}", e))?;
    let data = blocks
        .get("DATA")
        .or_else(|| blocks.get("CHARACTERS"))
        .ok_or("No DATA or CHARACTERS block found")?;

    let mut ntax = None;
    let mut nchar = None;
    let mut datatype = "DNA".to_string();
    let mut gap = b'-';
    let mut missing = b'?';
    let mut rows: Vec<(String, String)> = Vec::new();
    let mut in_matrix = false;

    for line in data {
        let upper = line.to_uppercase();
        if in_matrix {
            let row = line.trim_end_matches(';').trim();
            let mut fields = row.split_whitespace();
            if let Some(id) = fields.next() {
                let seq: String = fields.collect();
                rows.push((id.trim_matches('\'').to_string(), seq));
            }
            if line.ends_with(';') {
                in_matrix = false;
            }
        } else if upper.starts_with("DIMENSIONS") {
            let values = key_values(&key_value, line);
            ntax = parse_usize(&values, "NTAX")?;
            nchar = parse_usize(&values, "NCHAR")?;
        } else if upper.starts_with("FORMAT") {
            let values = key_values(&key_value, line);
            if let Some(v) = values.get("DATATYPE") {
                datatype = v.to_uppercase();
            }
            if let Some(&b) = values.get("GAP").and_then(|v| v.as_bytes().first()) {
                gap = b;
            }
            if let Some(&b) = values.get("MISSING").and_then(|v| v.as_bytes().first()) {
                missing = b;
            }
        } else if upper.starts_with("MATRIX") {
            in_matrix = true;
        }
    }

    // Interleaved matrices repeat ids; concatenate in order of first appearance
    let mut order: Vec<String> = Vec::new();
    let mut sequences: BTreeMap<String, Vec<u8>> = BTreeMap::new();
    for (id, seq) in rows {
        if !sequences.contains_key(&id) {
            order.push(id.clone());
        }
        sequences.entry(id).or_default().extend(seq.bytes());
    }

    if order.is_empty() {
        return Err("MATRIX contains no sequences".to_string());
    }
    if let Some(n) = ntax {
        if n != order.len() {
            return Err(format!("NTAX={} but MATRIX has {} sequences", n, order.len()));
        }
    }

    let target_len = nchar.unwrap_or_else(|| sequences.values().map(|s| s.len()).max().unwrap_or(0));
    let mut seqs = Vec::with_capacity(order.len());
    for id in &order {
        let mut seq = sequences.remove(id).unwrap_or_default();
        if seq.len() > target_len {
            return Err(format!(
                "Sequence {} has {} characters, more than NCHAR={}",
                id,
                seq.len(),
                target_len
            ));
        }
        seq.resize(target_len, missing);
        seqs.push(seq);
    }

    let alignment = Alignment::new(order, seqs)?;
    let charsets = match blocks.get("SETS").or_else(|| blocks.get("ASSUMPTIONS")) {
        Some(lines) => parse_charsets(lines)?,
        None => Vec::new(),
    };

    Ok(NexusFile {
        alignment,
        datatype,
        gap,
        missing,
        charsets,
    })
}

/// `CHARSET name = a-b c d-e;` lines as loci spanning the hull of their ranges.
///
/// Positions are 1-based and inclusive, so `1-100` becomes `[0, 100)`.
fn parse_charsets(lines: &[String]) -> Result<Vec<Locus>, String> {
    let header = Regex::new(r"(?i)^CHARSET\s+(\S+)\s*=\s*(.*?);?$")
        .map_err(|e| format!("Invalid charset regex: {}", e))?;
    let range =
        Regex::new(r"^(\d+)(?:-(\d+))?$").map_err(|e| format!("Invalid range regex: {}", e))?;

    let mut loci = Vec::new();
    for line in lines {
        let caps = match header.captures(line) {
            Some(caps) => caps,
            None => continue,
        };
        let name = caps[1].trim_matches('\'').to_string();

        let mut bounds: Option<(usize, usize)> = None;
        for token in caps[2].split_whitespace() {
            let token = token.trim_end_matches(';');
            let m = match range.captures(token) {
                Some(m) => m,
                None => continue,
            };
            let a: usize = m[1]
                .parse()
                .map_err(|_| format!("Invalid position '{}' in charset {}", &m[1], name))?;
            let b: usize = match m.get(2) {
                Some(b) => b
                    .as_str()
                    .parse()
                    .map_err(|_| format!("Invalid position '{}' in charset {}", b.as_str(), name))?,
                None => a,
            };
            let (lo, hi) = (a.min(b), a.max(b));
            if lo == 0 {
                return Err(format!("Charset {} uses position 0; NEXUS positions start at 1", name));
            }
            bounds = Some(match bounds {
                Some((start, stop)) => (start.min(lo), stop.max(hi)),
                None => (lo, hi),
            });
        }

        match bounds {
            Some((lo, hi)) => loci.push(Locus::new(name, lo - 1, hi)),
            None => return Err(format!("Charset {} has no positions", name)),
        }
    }
    Ok(loci)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "#NEXUS

BEGIN DATA;
    DIMENSIONS NTAX=3 NCHAR=12;
    FORMAT DATATYPE=DNA GAP=- MISSING=?;
    MATRIX
taxon_1  ACGTACGTACGT
taxon_2  ACGTACGTAC
'taxon_3'  acgtacgtacgt
;
END;

BEGIN SETS;
    CHARSET uce-1 = 1-6;
    CHARSET uce-2 = 7-9 10-12;
END;
";

    #[test]
    fn test_parse_data_block() {
        let nex = parse_nexus(SAMPLE).unwrap();
        assert_eq!(nex.alignment.n_seq(), 3);
        assert_eq!(nex.alignment.len(), 12);
        assert_eq!(nex.datatype, "DNA");
        assert_eq!(nex.gap, b'-');
        assert_eq!(nex.missing, b'?');
        assert_eq!(nex.alphabet().unwrap(), "ATGC");
        assert_eq!(nex.alignment.ids()[2], "taxon_3");
        // Short rows are padded with the missing symbol
        assert_eq!(&nex.alignment.sequences()[1][10..], b"??");
    }

    #[test]
    fn test_parse_charsets() {
        let nex = parse_nexus(SAMPLE).unwrap();
        assert_eq!(
            nex.charsets,
            vec![Locus::new("uce-1", 0, 6), Locus::new("uce-2", 6, 12)]
        );
    }

    #[test]
    fn test_interleaved_matrix() {
        let content = "#NEXUS
BEGIN CHARACTERS;
DIMENSIONS NTAX=2 NCHAR=8;
FORMAT DATATYPE=DNA MISSING=N GAP=-;
MATRIX
a ACGT
b TTTT

a GGCC
b AAAA;
END;
";
        let nex = parse_nexus(content).unwrap();
        assert_eq!(nex.alignment.sequences()[0], b"ACGTGGCC".to_vec());
        assert_eq!(nex.alignment.sequences()[1], b"TTTTAAAA".to_vec());
        assert_eq!(nex.missing, b'N');
        assert!(nex.charsets.is_empty());
    }

    #[test]
    fn test_charset_single_positions() {
        let lines = vec!["CHARSET one = 1-100;".to_string(), "charset two = 5 3 9;".to_string()];
        let loci = parse_charsets(&lines).unwrap();
        assert_eq!(loci[0], Locus::new("one", 0, 100));
        assert_eq!(loci[1], Locus::new("two", 2, 9));
        assert!(parse_charsets(&["CHARSET zero = 0-5;".to_string()]).is_err());
    }

    #[test]
    fn test_errors() {
        assert!(parse_nexus("#NEXUS\nBEGIN TAXA;\nEND;\n").is_err());
        let wrong_ntax = SAMPLE.replace("NTAX=3", "NTAX=4");
        assert!(parse_nexus(&wrong_ntax).is_err());
        assert!(alphabet_for_datatype("standard").is_err());
        assert_eq!(alphabet_for_datatype("protein").unwrap().len(), 20);
    }
}

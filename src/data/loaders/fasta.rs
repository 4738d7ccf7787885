// fasta.rs - Aligned FASTA loader

use crate::data::alignment::Alignment;
use bio::io::fasta;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Alphabet assumed for FASTA alignments
pub const FASTA_ALPHABET: &str = "ATGC";

/// Load an aligned FASTA file; every record must have the same length
pub fn load_fasta(path: &Path) -> Result<Alignment, String> {
    let file = File::open(path)
        .map_err(|e| format!("Failed to open FASTA file {}: {}", path.display(), e))?;
    read_fasta(BufReader::new(file)).map_err(|e| format!("{}: {}", path.display(), e))
}

/// Read FASTA records from any reader into an alignment
pub fn read_fasta<R: Read>(reader: R) -> Result<Alignment, String> {
    let reader = fasta::Reader::new(reader);
    let mut ids = Vec::new();
    let mut sequences = Vec::new();

    for record_result in reader.records() {
        let record = record_result.map_err(|e| format!("Invalid FASTA record: {}", e))?;
        ids.push(record.id().to_string());
        sequences.push(record.seq().to_vec());
    }

    if ids.is_empty() {
        return Err("FASTA file contains no records".to_string());
    }
    Alignment::new(ids, sequences)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_fasta_alignment() {
        let input = b">seq1 first\nATGC\nAT\n>seq2\nTACG\nTA\n";
        let aln = read_fasta(&input[..]).unwrap();
        assert_eq!(aln.n_seq(), 2);
        assert_eq!(aln.len(), 6);
        assert_eq!(aln.ids(), &["seq1".to_string(), "seq2".to_string()]);
        assert_eq!(aln.sequences()[0], b"ATGCAT".to_vec());
    }

    #[test]
    fn test_ragged_fasta_is_rejected() {
        let input = b">a\nATGC\n>b\nATG\n";
        assert!(read_fasta(&input[..]).is_err());
        assert!(read_fasta(&b""[..]).is_err());
    }
}

//! Integration tests for trace files.
//!
//! These tests verify the path from a trace on disk to the final counters.

use std::io::Write;

use tempfile::NamedTempFile;
use vmsim::trace::read_trace;
use vmsim::{Error, MemoryManager, MmuConfig, PolicyKind};

fn write_trace(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file.flush().unwrap();
    file
}

/// R1 R2 R3 R1 R4 expressed as addresses (page = address >> 12).
const CLOCK_TRACE: &[&str] = &[
    "00001a00 R",
    "00002004 R",
    "00003ff0 R",
    "00001000 R",
    "00004010 R",
];

#[test]
fn test_replay_trace_file() {
    let file = write_trace(CLOCK_TRACE);

    let mut mmu = MemoryManager::new(MmuConfig::new(3, PolicyKind::Clock)).unwrap();
    let events = mmu.replay_trace(read_trace(file.path()).unwrap()).unwrap();

    assert_eq!(events, 5);
    assert_eq!(mmu.get_total_page_faults(), 4);
    assert_eq!(mmu.get_total_disk_reads(), 4);
    assert_eq!(mmu.get_total_disk_writes(), 0);
    assert_eq!(mmu.stats().fault_rate(), 0.8);
}

#[test]
fn test_same_trace_all_policies() {
    let lines = [
        "00001000 W",
        "00002000 R",
        "00001000 R",
        "00003000 W",
        "00002000 R",
        "",
        "00004000 R",
        "00001000 W",
        "00003000 R",
    ];
    let file = write_trace(&lines);

    for kind in [PolicyKind::Clock, PolicyKind::Lru, PolicyKind::Random] {
        let config = MmuConfig::new(2, kind).with_seed(3);
        let mut mmu = MemoryManager::new(config).unwrap();
        let events = mmu.replay_trace(read_trace(file.path()).unwrap()).unwrap();

        assert_eq!(events, 8, "{} skipped a record", kind);
        let stats = mmu.stats();
        assert_eq!(stats.page_faults, stats.disk_reads);
        assert_eq!(stats.hits + stats.page_faults, 8);
        assert!(stats.disk_writes <= stats.evictions);
        assert_eq!(stats.evictions, stats.page_faults - 2);
    }
}

#[test]
fn test_lru_trace_file() {
    // W1 R2 R1 W3 with two frames: page 2 is evicted, nothing written back.
    let file = write_trace(&["00001000 W", "00002000 R", "00001000 R", "00003000 W"]);

    let mut mmu = MemoryManager::new(MmuConfig::new(2, PolicyKind::Lru)).unwrap();
    mmu.replay_trace(read_trace(file.path()).unwrap()).unwrap();

    assert_eq!(mmu.get_total_page_faults(), 3);
    assert_eq!(mmu.get_total_disk_writes(), 0);
}

#[test]
fn test_malformed_trace_reports_line() {
    let file = write_trace(&["00001000 R", "00002000 Q"]);

    let mut mmu = MemoryManager::new(MmuConfig::new(2, PolicyKind::Lru)).unwrap();
    let result = mmu.replay_trace(read_trace(file.path()).unwrap());

    match result {
        Err(Error::MalformedTrace { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected MalformedTrace, got {:?}", other),
    }
    assert_eq!(mmu.stats().accesses, 1);
}

#[test]
fn test_missing_trace_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = read_trace(dir.path().join("missing.trace"));
    assert!(matches!(result, Err(Error::Io(_))));
}

//! Sentinel framing over arbitrarily chunked output

use std::collections::VecDeque;
use std::io::{self, Read};

use adb_shell::{Shell, ShellSession};
use proptest::prelude::*;

/// Reader that hands out pre-arranged chunks, one per `read` call
struct ChunkedReader {
    chunks: VecDeque<Vec<u8>>,
}

impl ChunkedReader {
    fn new<I, C>(chunks: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: AsRef<[u8]>,
    {
        Self {
            chunks: chunks.into_iter().map(|c| c.as_ref().to_vec()).collect(),
        }
    }
}

impl Read for ChunkedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Some(mut chunk) = self.chunks.pop_front() else {
            return Ok(0);
        };
        if chunk.len() > buf.len() {
            let rest = chunk.split_off(buf.len());
            self.chunks.push_front(rest);
        }
        buf[..chunk.len()].copy_from_slice(&chunk);
        Ok(chunk.len())
    }
}

/// Reader that interrupts every other call
struct InterruptingReader {
    inner: ChunkedReader,
    interrupt_next: bool,
}

impl Read for InterruptingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.interrupt_next = !self.interrupt_next;
        if self.interrupt_next {
            return Err(io::ErrorKind::Interrupted.into());
        }
        self.inner.read(buf)
    }
}

#[test]
fn test_sentinel_split_across_three_chunks() {
    let reader = ChunkedReader::new([
        "  mCurrentFocus=Window{1f2e3d u0 com.netflix.ninja/com.netflix.ninja.MainActivity}\nCOMM",
        "AND COMP",
        "LETE\n",
    ]);
    let mut session = ShellSession::from_streams(reader, io::sink());

    let output = session
        .execute("dumpsys window windows | grep mCurrentFocus=")
        .unwrap();

    assert_eq!(
        output,
        "  mCurrentFocus=Window{1f2e3d u0 com.netflix.ninja/com.netflix.ninja.MainActivity}\n"
    );
}

#[test]
fn test_sentinel_text_inside_output_is_not_a_terminator() {
    // Sentinel text without the trailing newline is ordinary output
    let reader = ChunkedReader::new(["echo COMMAND COMPLETE was here\n", "COMMAND COMPLETE\n"]);
    let mut session = ShellSession::from_streams(reader, io::sink());

    assert_eq!(
        session.execute("cat notes.txt").unwrap(),
        "echo COMMAND COMPLETE was here\n"
    );
}

#[test]
fn test_single_byte_reads() {
    let text = "3600.25 7000.50\nCOMMAND COMPLETE\n";
    let reader = ChunkedReader::new(text.bytes().map(|b| [b]));
    let mut session = ShellSession::from_streams(reader, io::sink());

    assert_eq!(session.execute("cat /proc/uptime").unwrap(), "3600.25 7000.50\n");
}

#[test]
fn test_interrupted_reads_are_retried() {
    let reader = InterruptingReader {
        inner: ChunkedReader::new(["darcy\n", "COMMAND COMPLETE\n"]),
        interrupt_next: false,
    };
    let mut session = ShellSession::from_streams(reader, io::sink());

    assert_eq!(session.execute("getprop ro.product.name").unwrap(), "darcy\n");
}

#[test]
fn test_stream_ending_mid_command_is_an_error() {
    let reader = ChunkedReader::new(["half of the outp"]);
    let mut session = ShellSession::from_streams(reader, io::sink());

    let err = session.execute("dumpsys media_session").unwrap_err();
    assert!(err.is_end_of_stream());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any split of the wire bytes yields exactly the pre-sentinel output
    #[test]
    fn prop_chunking_never_changes_output(
        body in "[a-z0-9 .=/\n]{0,200}",
        cuts in proptest::collection::vec(any::<prop::sample::Index>(), 0..6),
    ) {
        let wire = format!("{}COMMAND COMPLETE\n", body).into_bytes();

        let mut points: Vec<usize> = cuts.iter().map(|i| i.index(wire.len())).collect();
        points.sort_unstable();
        points.dedup();

        let mut chunks = Vec::new();
        let mut start = 0;
        for point in points.into_iter().filter(|&p| p > 0) {
            chunks.push(wire[start..point].to_vec());
            start = point;
        }
        chunks.push(wire[start..].to_vec());

        let mut session = ShellSession::from_streams(ChunkedReader::new(chunks), io::sink());
        prop_assert_eq!(session.execute("cmd").unwrap(), body);
    }
}

//! Step traces and deterministic replay.
//!
//! A [`StepTrace`] is the complete ordered step list of one run together with
//! the run's identity (algorithm and input). Because step sources are pure,
//! recording the same identity twice must give the same trace; the BLAKE3
//! checksum makes that cheap to compare and to check after a round trip
//! through JSON lines.
//!
//! # JSON lines layout
//!
//! ```text
//! {"algorithm":"bubble","input":[5,3,8,1],"steps":5,"checksum":"9f2c…"}
//! {"values":[3,5,8,1],"highlights":{"pair":[0,1]}}
//! …
//! ```

use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};

use crate::algorithms::Algorithm;
use crate::engine::{Highlights, Step, Value};
use crate::error::{SortError, SortResult};

/// First line of a serialized trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceHeader {
    /// Variant that produced the trace.
    pub algorithm: Algorithm,
    /// Input sequence.
    pub input: Vec<Value>,
    /// Number of step lines that follow.
    pub steps: usize,
    /// Hex BLAKE3 checksum of the steps.
    pub checksum: String,
}

/// Recorded step list of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepTrace {
    algorithm: Algorithm,
    input: Vec<Value>,
    steps: Vec<Step>,
}

impl StepTrace {
    /// Record every step `algorithm` emits for `input`.
    #[must_use]
    pub fn record(algorithm: Algorithm, input: &[Value]) -> Self {
        let steps: Vec<Step> = algorithm.steps(input).collect();
        tracing::debug!(
            algorithm = algorithm.id(),
            len = input.len(),
            steps = steps.len(),
            "recorded trace"
        );
        Self {
            algorithm,
            input: input.to_vec(),
            steps,
        }
    }

    /// Variant that produced the trace.
    #[must_use]
    pub const fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Input sequence.
    #[must_use]
    pub fn input(&self) -> &[Value] {
        &self.input
    }

    /// Recorded steps, in emission order.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether no steps were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Last recorded step.
    #[must_use]
    pub fn terminal(&self) -> Option<&Step> {
        self.steps.last()
    }

    /// BLAKE3 digest over every step (values and highlights).
    #[must_use]
    pub fn checksum(&self) -> [u8; 32] {
        *self.hash().as_bytes()
    }

    /// Hex form of [`Self::checksum`].
    #[must_use]
    pub fn checksum_hex(&self) -> String {
        self.hash().to_hex().to_string()
    }

    fn hash(&self) -> blake3::Hash {
        let mut hasher = blake3::Hasher::new();
        for step in &self.steps {
            hasher.update(&(step.len() as u64).to_le_bytes());
            for value in step.values() {
                hasher.update(&value.to_le_bytes());
            }
            let (tag, a, b) = match step.highlights() {
                Highlights::None => (0u8, 0, 0),
                Highlights::One(a) => (1, a, 0),
                Highlights::Pair(a, b) => (2, a, b),
            };
            hasher.update(&[tag]);
            hasher.update(&(a as u64).to_le_bytes());
            hasher.update(&(b as u64).to_le_bytes());
        }
        hasher.finalize()
    }

    /// Re-record this trace's identity and compare.
    ///
    /// # Errors
    ///
    /// Returns `Replay` if the fresh recording differs.
    pub fn verify(&self) -> SortResult<()> {
        let fresh = Self::record(self.algorithm, &self.input);
        if fresh.steps.len() != self.steps.len() {
            return Err(SortError::replay(format!(
                "step count differs: recorded {}, replayed {}",
                self.steps.len(),
                fresh.steps.len()
            )));
        }
        if let Some(index) = self
            .steps
            .iter()
            .zip(&fresh.steps)
            .position(|(recorded, replayed)| recorded != replayed)
        {
            return Err(SortError::replay(format!("step {index} differs on replay")));
        }
        Ok(())
    }

    /// Write the header line followed by one line per step.
    ///
    /// # Errors
    ///
    /// Returns error on serialization or write failure.
    pub fn write_json_lines<W: Write>(&self, mut out: W) -> SortResult<()> {
        let header = TraceHeader {
            algorithm: self.algorithm,
            input: self.input.clone(),
            steps: self.steps.len(),
            checksum: self.checksum_hex(),
        };
        serde_json::to_writer(&mut out, &header)?;
        writeln!(out)?;
        for step in &self.steps {
            serde_json::to_writer(&mut out, step)?;
            writeln!(out)?;
        }
        out.flush()?;
        Ok(())
    }

    /// Read a trace written by [`Self::write_json_lines`].
    ///
    /// # Errors
    ///
    /// Returns `Serialization` for malformed lines and `Replay` when the
    /// step count or checksum disagrees with the header.
    pub fn read_json_lines<R: BufRead>(input: R) -> SortResult<Self> {
        let mut lines = input.lines();
        let header_line = lines
            .next()
            .ok_or_else(|| SortError::serialization("empty trace"))??;
        let header: TraceHeader = serde_json::from_str(&header_line)?;

        let mut steps = Vec::with_capacity(header.steps);
        for line in lines {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            steps.push(serde_json::from_str::<Step>(&line)?);
        }

        if steps.len() != header.steps {
            return Err(SortError::replay(format!(
                "header declares {} steps, found {}",
                header.steps,
                steps.len()
            )));
        }

        let trace = Self {
            algorithm: header.algorithm,
            input: header.input,
            steps,
        };
        if trace.checksum_hex() != header.checksum {
            return Err(SortError::replay("checksum mismatch"));
        }
        Ok(trace)
    }
}

/// Record `runs` traces of the same run and require identical checksums.
///
/// # Errors
///
/// Returns `Replay` on the first diverging run.
pub fn verify_determinism(
    algorithm: Algorithm,
    input: &[Value],
    runs: usize,
) -> SortResult<[u8; 32]> {
    let reference = StepTrace::record(algorithm, input).checksum();
    for run in 1..runs {
        let checksum = StepTrace::record(algorithm, input).checksum();
        if checksum != reference {
            return Err(SortError::replay(format!(
                "run {run} diverged from the first run"
            )));
        }
    }
    Ok(reference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_record_bubble_trace() {
        let trace = StepTrace::record(Algorithm::Bubble, &[5, 3, 8, 1]);
        assert_eq!(trace.len(), 5);
        assert_eq!(trace.steps()[0].highlights(), Highlights::Pair(0, 1));
        assert_eq!(trace.terminal(), Some(&Step::plain(&[1, 3, 5, 8])));
        assert_eq!(trace.input(), &[5, 3, 8, 1]);
    }

    #[test]
    fn test_checksum_is_stable() {
        let a = StepTrace::record(Algorithm::Heap, &[9, 4, 7, 1, 3]);
        let b = StepTrace::record(Algorithm::Heap, &[9, 4, 7, 1, 3]);
        assert_eq!(a.checksum(), b.checksum());
        assert_eq!(a.checksum_hex().len(), 64);
    }

    #[test]
    fn test_checksum_sees_highlights() {
        let merge = StepTrace::record(Algorithm::Merge, &[1, 2, 3, 4]);
        let bubble = StepTrace::record(Algorithm::Bubble, &[1, 2, 3, 4]);
        assert_ne!(merge.checksum(), bubble.checksum());
    }

    #[test]
    fn test_verify_determinism() {
        let input = [12, 5, 9, 5, 1, 30, 2];
        for algorithm in Algorithm::ALL {
            assert!(verify_determinism(algorithm, &input, 3).is_ok());
        }
    }

    #[test]
    fn test_verify_detects_tampering() {
        let mut trace = StepTrace::record(Algorithm::Selection, &[3, 2, 1]);
        assert!(trace.verify().is_ok());
        trace.steps[0] = Step::plain(&[3, 2, 1]);
        assert!(matches!(trace.verify(), Err(SortError::Replay(_))));
    }

    #[test]
    fn test_json_lines_roundtrip() {
        let trace = StepTrace::record(Algorithm::Quick, &[4, 1, 3, 2]);
        let mut buffer = Vec::new();
        trace.write_json_lines(&mut buffer).expect("write");

        let text = String::from_utf8(buffer.clone()).expect("utf8");
        assert_eq!(text.lines().count(), trace.len() + 1);
        assert!(text.starts_with("{\"algorithm\":\"quick\""));

        let restored = StepTrace::read_json_lines(Cursor::new(buffer)).expect("read");
        assert_eq!(restored, trace);
    }

    #[test]
    fn test_read_rejects_bad_checksum() {
        let trace = StepTrace::record(Algorithm::Insertion, &[2, 1]);
        let mut buffer = Vec::new();
        trace.write_json_lines(&mut buffer).expect("write");
        let text = String::from_utf8(buffer).expect("utf8");
        let tampered = text.replacen("\"values\":[1,2]", "\"values\":[2,1]", 1);

        let result = StepTrace::read_json_lines(Cursor::new(tampered));
        assert!(matches!(result, Err(SortError::Replay(_))));
    }

    #[test]
    fn test_read_rejects_truncated_trace() {
        let trace = StepTrace::record(Algorithm::Merge, &[3, 1, 2]);
        let mut buffer = Vec::new();
        trace.write_json_lines(&mut buffer).expect("write");
        let text = String::from_utf8(buffer).expect("utf8");
        let truncated: String = text.lines().take(2).map(|l| format!("{l}\n")).collect();

        let result = StepTrace::read_json_lines(Cursor::new(truncated));
        assert!(matches!(result, Err(SortError::Replay(_))));
    }

    #[test]
    fn test_read_empty_input() {
        let result = StepTrace::read_json_lines(Cursor::new(""));
        assert!(matches!(result, Err(SortError::Serialization(_))));
    }
}

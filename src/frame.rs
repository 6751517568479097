use std::io::BufRead;

use crate::detection::Detection;
use crate::error::LogError;

pub struct Frame {
    pub index: u64,
    pub detections: Vec<Detection>,
}

impl Frame {
    #[inline]
    pub fn len(&self) -> usize {
        self.detections.len()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Detection> {
        self.detections.iter()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }

    /// Parses one `<frame>:<json detections>` log line.
    pub fn parse_line(line_no: usize, line: &str) -> Result<Self, LogError> {
        let idx = line
            .find(':')
            .ok_or(LogError::MissingSeparator { line: line_no })?;
        let (index, vector) = line.split_at(idx);

        let index = index
            .trim()
            .parse::<u64>()
            .map_err(|_| LogError::FrameIndex {
                line: line_no,
                value: index.trim().to_string(),
            })?;

        let detections = serde_json::from_str(&vector[1..]).map_err(|source| {
            LogError::Detections {
                line: line_no,
                source,
            }
        })?;

        Ok(Frame { index, detections })
    }

    pub fn to_line(&self) -> String {
        // Vec<Detection> of plain floats always serializes
        let json = serde_json::to_string(&self.detections).unwrap_or_else(|_| "[]".into());
        format!("{}:{}", self.index, json)
    }
}

/// Iterates frames of a detection log, skipping blank lines.
pub struct FrameReader<R> {
    lines: std::io::Lines<R>,
    line_no: usize,
}

impl<R: BufRead> FrameReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }
}

impl<R: BufRead> Iterator for FrameReader<R> {
    type Item = Result<Frame, LogError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(err) => return Some(Err(err.into())),
            };
            self.line_no += 1;

            if line.trim().is_empty() {
                continue;
            }

            return Some(Frame::parse_line(self.line_no, &line));
        }
    }
}

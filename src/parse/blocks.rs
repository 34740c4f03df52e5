//! String block assembly
//!
//! Groups classified lines into string blocks: one optional timing line
//! followed by exactly four string lines in G,D,A,E order. Text and blank
//! lines around the musical lines are buffered and tagged by position so the
//! placement pass can turn them into annotations later.
//!
//! The accumulator is an explicit state machine. `Idle` sits between blocks,
//! `AwaitingStringLines` has captured a timing row but no lane yet, and
//! `InBlock(n)` has captured `n` of the four lanes.

use crate::error::TabError;
use crate::models::config::Configuration;
use crate::models::song::{BufferedLine, Lane, Song, StringBlock};
use crate::parse::classify::{LineKind, StringLineData};

#[derive(Clone, Copy, Debug, PartialEq)]
enum State {
    Idle,
    AwaitingStringLines,
    InBlock(usize),
}

/// One captured lane line, kept until the block closes
struct LaneLine {
    line: usize,
    data: StringLineData,
}

pub struct BlockAssembler<'a> {
    config: &'a Configuration,
    state: State,
    blocks: Vec<StringBlock>,
    /// Extra/blank lines buffered while idle
    pending: Vec<BufferedLine>,
    /// Extra lines buffered inside the current block
    above: Vec<BufferedLine>,
    timing: Option<(usize, String)>,
    lanes: Vec<LaneLine>,
    last_line: usize,
}

impl<'a> BlockAssembler<'a> {
    pub fn new(config: &'a Configuration) -> Self {
        BlockAssembler {
            config,
            state: State::Idle,
            blocks: Vec::new(),
            pending: Vec::new(),
            above: Vec::new(),
            timing: None,
            lanes: Vec::new(),
            last_line: 0,
        }
    }

    /// Whether the classifier should recognize a timing line next. Only a
    /// block boundary can start a timing row.
    pub fn timing_expected(&self) -> bool {
        self.state == State::Idle && self.config.timing_supplied
    }

    /// Feed one classified line in input order
    pub fn push(&mut self, line: usize, kind: LineKind) -> Result<(), TabError> {
        self.last_line = line;
        match kind {
            LineKind::Blank => {
                if self.state == State::Idle {
                    self.pending.push(BufferedLine {
                        line,
                        text: String::new(),
                    });
                }
                // blank lines inside a block are formatting, dropped
            }
            LineKind::Extra(text) => {
                let buffered = BufferedLine { line, text };
                if self.state == State::Idle {
                    self.pending.push(buffered);
                } else {
                    self.above.push(buffered);
                }
            }
            LineKind::Timing(text) => {
                // the classifier only produces timing lines at block
                // boundaries, so this opens a block
                self.open_block();
                self.timing = Some((line, text));
                self.state = State::AwaitingStringLines;
            }
            LineKind::StringLine(data) => {
                let collected = match self.state {
                    State::Idle => {
                        self.open_block();
                        0
                    }
                    State::AwaitingStringLines => 0,
                    State::InBlock(n) => n,
                };
                let expected = Lane::ALL[collected];
                if let Some(found) = data.lane_char {
                    if Lane::from_id(found) != Some(expected) {
                        return Err(TabError::StringOrder {
                            line,
                            found,
                            expected: expected.id(),
                        });
                    }
                }
                self.lanes.push(LaneLine { line, data });
                if collected + 1 == Lane::ALL.len() {
                    self.close_block();
                    self.state = State::Idle;
                } else {
                    self.state = State::InBlock(collected + 1);
                }
            }
        }
        Ok(())
    }

    /// Finish the scan: the accumulator must be idle, and anything still
    /// buffered trails the last block.
    pub fn finish(mut self) -> Result<Song, TabError> {
        match self.state {
            State::Idle => {}
            State::AwaitingStringLines => {
                return Err(TabError::IncompleteStringBlock {
                    line: self.last_line,
                    got: 0,
                })
            }
            State::InBlock(n) => {
                return Err(TabError::IncompleteStringBlock {
                    line: self.last_line,
                    got: n,
                })
            }
        }
        let pending = std::mem::take(&mut self.pending);
        if let Some(last) = self.blocks.last_mut() {
            last.after_lines = pending;
        } else if !pending.is_empty() {
            log::debug!(
                "{} buffered lines with no string block to attach to",
                pending.len()
            );
        }
        Ok(Song {
            blocks: self.blocks,
        })
    }

    /// A new block is starting: what was buffered while idle trails the
    /// previous block, or leads the first one.
    fn open_block(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        if let Some(last) = self.blocks.last_mut() {
            last.after_lines = pending;
        } else {
            // no previous block; keep for the block being opened
            self.pending = pending;
        }
    }

    fn close_block(&mut self) {
        let lanes: Vec<LaneLine> = std::mem::take(&mut self.lanes);
        let g_indent = lanes[0].data.indent;
        let g_len = lanes[0].data.content.chars().count();

        let timing_line = self.timing.as_ref().map(|(line, _)| *line);

        // Re-align the timing row to the G lane: whatever was trimmed from
        // the front of the G line comes off the front of the timing row, and
        // the row is padded (or cut) to the G lane's length so each symbol
        // sits above its note column.
        let timing_row = self.timing.take().map(|(_, text)| {
            let mut chars: Vec<char> = text.chars().collect();
            let drop = g_indent.min(chars.len());
            chars.drain(..drop);
            if chars.len() > g_len {
                log::debug!(
                    "timing row extends {} columns past the G lane, truncating",
                    chars.len() - g_len
                );
                chars.truncate(g_len);
            }
            while chars.len() < g_len {
                chars.push(' ');
            }
            chars.into_iter().collect::<String>()
        });

        let first_line = timing_line.unwrap_or(lanes[0].line).min(lanes[0].line);

        let mut block = StringBlock {
            index: self.blocks.len(),
            first_line,
            last_line: lanes[3].line,
            lane_lines: [lanes[0].line, lanes[1].line, lanes[2].line, lanes[3].line],
            lanes: [
                lanes[0].data.content.clone(),
                lanes[1].data.content.clone(),
                lanes[2].data.content.clone(),
                lanes[3].data.content.clone(),
            ],
            timing_row,
            leading_extra: [
                lanes[0].data.leading.clone(),
                lanes[1].data.leading.clone(),
                lanes[2].data.leading.clone(),
                lanes[3].data.leading.clone(),
            ],
            trailing_extra: [
                lanes[0].data.trailing.clone(),
                lanes[1].data.trailing.clone(),
                lanes[2].data.trailing.clone(),
                lanes[3].data.trailing.clone(),
            ],
            before_lines: Vec::new(),
            above_lines: std::mem::take(&mut self.above),
            after_lines: Vec::new(),
            measures: Vec::new(),
            annotations: Vec::new(),
            blank_rows_before: 0,
            blank_rows_after: 0,
        };
        if self.blocks.is_empty() {
            block.before_lines = std::mem::take(&mut self.pending);
        }
        log::debug!(
            "closed string block {} (lines {}-{})",
            block.index,
            block.first_line,
            block.last_line
        );
        self.blocks.push(block);
    }
}

/// Backtick code spans.
///
/// An opening run of `n` backticks is closed by the next run of exactly `n`
/// backticks on the same line; longer or shorter runs are skipped. The
/// interior is a raw zone, no other inline parsing applies there.
pub struct CodeSpan;

/// A successful scan: tick count, interior range, and the position just
/// past the closing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeSpanScan {
    pub ticks: usize,
    pub content_start: usize,
    pub content_end: usize,
    pub end: usize,
}

impl CodeSpan {
    pub const TICK: char = '`';

    pub fn scan(window: &[char], pos: usize) -> Option<CodeSpanScan> {
        let ticks = run_len(window, pos, Self::TICK);
        if ticks == 0 {
            return None;
        }
        let mut i = pos + ticks;
        while i < window.len() {
            match window[i] {
                '\n' => return None,
                Self::TICK => {
                    let run = run_len(window, i, Self::TICK);
                    if run == ticks {
                        return Some(CodeSpanScan {
                            ticks,
                            content_start: pos + ticks,
                            content_end: i,
                            end: i + run,
                        });
                    }
                    i += run;
                }
                _ => i += 1,
            }
        }
        None
    }
}

/// Length of the run of `ch` starting at `pos`.
pub fn run_len(window: &[char], pos: usize, ch: char) -> usize {
    window[pos..].iter().take_while(|&&c| c == ch).count()
}

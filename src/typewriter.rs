//! Landing banner typewriter animation.
//!
//! A small timed state loop: type a phrase one character at a time, delete
//! it one character at a time, move on to the next phrase, repeat.

use std::io::Write;
use std::time::Duration;

pub const PHRASES: [&str; 3] = ["Your Second Brain.", "Your Idea Hub.", "Your Thought Garden."];

const TYPE_DELAY: Duration = Duration::from_millis(100);
const DELETE_DELAY: Duration = Duration::from_millis(60);

/// One displayed state: the visible text and how long to wait before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub text: String,
    pub delay: Duration,
}

/// Typewriter state. Iterating yields frames forever.
#[derive(Debug, Clone)]
pub struct Typewriter {
    phrases: Vec<String>,
    index: usize,
    shown: usize,
    deleting: bool,
}

impl Typewriter {
    #[must_use]
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            phrases: phrases.into_iter().map(Into::into).collect(),
            index: 0,
            shown: 0,
            deleting: false,
        }
    }

    /// Index of the phrase currently being typed or deleted.
    #[must_use]
    pub fn phrase_index(&self) -> usize {
        self.index
    }

    /// Frames in one full pass over all phrases.
    #[must_use]
    pub fn frames_per_cycle(&self) -> usize {
        self.phrases
            .iter()
            .map(|p| 2 * (p.chars().count() + 1))
            .sum()
    }
}

impl Default for Typewriter {
    fn default() -> Self {
        Self::new(PHRASES)
    }
}

impl Iterator for Typewriter {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        let phrase = self.phrases.get(self.index)?;
        let len = phrase.chars().count();
        let frame = Frame {
            text: phrase.chars().take(self.shown).collect(),
            delay: if self.deleting { DELETE_DELAY } else { TYPE_DELAY },
        };

        if self.deleting {
            if self.shown > 0 {
                self.shown -= 1;
            } else {
                self.deleting = false;
                self.index = (self.index + 1) % self.phrases.len();
            }
        } else if self.shown < len {
            self.shown += 1;
        } else {
            self.deleting = true;
        }

        Some(frame)
    }
}

/// Play `cycles` passes of the animation on `out`, redrawing one line.
pub async fn play<W: Write>(typewriter: Typewriter, out: &mut W, cycles: usize) -> std::io::Result<()> {
    let frames = typewriter.frames_per_cycle() * cycles;
    for frame in typewriter.take(frames) {
        tokio::time::sleep(frame.delay).await;
        write!(out, "\r\x1b[2K{}|", frame.text)?;
        out.flush()?;
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn types_then_deletes_then_advances() {
        let frames: Vec<_> = Typewriter::new(["ab", "c"]).take(10).collect();
        let texts: Vec<_> = frames.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, ["", "a", "ab", "ab", "a", "", "", "c", "c", ""]);

        assert_eq!(frames[0].delay, TYPE_DELAY);
        assert_eq!(frames[3].delay, DELETE_DELAY);
        assert_eq!(frames[6].delay, TYPE_DELAY);
    }

    #[test]
    fn wraps_back_to_first_phrase() {
        let mut tw = Typewriter::new(["a"]);
        let cycle = tw.frames_per_cycle();
        for _ in 0..cycle {
            tw.next();
        }
        assert_eq!(tw.phrase_index(), 0);
        assert_eq!(tw.next().unwrap().text, "");
    }

    #[test]
    fn no_phrases_means_no_frames() {
        assert!(Typewriter::new(Vec::<String>::new()).next().is_none());
    }

    #[test]
    fn handles_multibyte_phrases() {
        let texts: Vec<_> = Typewriter::new(["hé"]).take(3).map(|f| f.text).collect();
        assert_eq!(texts, ["", "h", "hé"]);
    }

    #[tokio::test]
    async fn play_writes_final_newline() {
        let mut out = Vec::new();
        play(Typewriter::new(["hi"]), &mut out, 1).await.unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("hi|"));
        assert!(text.ends_with('\n'));
    }
}

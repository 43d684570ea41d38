//! Date/time shape pre-filter
//!
//! A structural check run before handing text to the date parser. It answers
//! "does this look like a date?" for four layouts, always against the whole
//! string:
//!
//! 1. `YYYY-MM-DD(T| )HH:MM:SS[.fraction][Z|±HH:MM]`
//! 2. `DD Mon YYYY HH:MM:SS TZA`
//! 3. `Mon D[,] YYYY H:MM[:SS] AM|PM`
//! 4. `YYYY-MM-DD`
//!
//! Field values are not validated (`2023-13-45` is date-shaped); rejecting
//! impossible dates is the parser's job.

/// Whether `text` has one of the accepted date/time shapes
pub fn is_date_shaped(text: &str) -> bool {
    let bytes = text.as_bytes();
    iso_date_time(bytes) || rfc822_style(bytes) || us_style(bytes) || bare_iso_date(bytes)
}

fn iso_date_time(bytes: &[u8]) -> bool {
    let mut c = Cursor::new(bytes);
    if !(iso_date(&mut c) && c.one_of(b"T ") && hms(&mut c)) {
        return false;
    }
    if c.eat(b'.') && c.digits_between(1, usize::MAX) == 0 {
        return false;
    }
    let zone_ok = if c.one_of(b"+-") {
        c.digits(2) && c.eat(b':') && c.digits(2)
    } else {
        c.eat(b'Z');
        true
    };
    zone_ok && c.at_end()
}

fn rfc822_style(bytes: &[u8]) -> bool {
    let mut c = Cursor::new(bytes);
    c.digits(2)
        && c.eat(b' ')
        && c.letters(3)
        && c.eat(b' ')
        && c.digits(4)
        && c.eat(b' ')
        && hms(&mut c)
        && c.eat(b' ')
        && c.upper(3)
        && c.at_end()
}

fn us_style(bytes: &[u8]) -> bool {
    let mut c = Cursor::new(bytes);
    if !(c.letters(3) && c.eat(b' ') && c.digits_between(1, 2) > 0) {
        return false;
    }
    c.eat(b',');
    if !(c.eat(b' ') && c.digits(4) && c.eat(b' ')) {
        return false;
    }
    if !(c.digits_between(1, 2) > 0 && c.eat(b':') && c.digits(2)) {
        return false;
    }
    if c.eat(b':') && !c.digits(2) {
        return false;
    }
    c.eat(b' ') && c.one_of(b"AP") && c.eat(b'M') && c.at_end()
}

fn bare_iso_date(bytes: &[u8]) -> bool {
    let mut c = Cursor::new(bytes);
    iso_date(&mut c) && c.at_end()
}

fn iso_date(c: &mut Cursor<'_>) -> bool {
    c.digits(4) && c.eat(b'-') && c.digits(2) && c.eat(b'-') && c.digits(2)
}

fn hms(c: &mut Cursor<'_>) -> bool {
    c.digits(2) && c.eat(b':') && c.digits(2) && c.eat(b':') && c.digits(2)
}

/// Forward-only byte cursor; every matcher consumes only on success
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn at_end(&self) -> bool {
        self.pos == self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn eat(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn one_of(&mut self, set: &[u8]) -> bool {
        match self.peek() {
            Some(b) if set.contains(&b) => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    /// Exactly `n` bytes satisfying `pred`
    fn exactly(&mut self, n: usize, pred: fn(&u8) -> bool) -> bool {
        match self.bytes.get(self.pos..self.pos + n) {
            Some(run) if run.iter().all(pred) => {
                self.pos += n;
                true
            }
            _ => false,
        }
    }

    fn digits(&mut self, n: usize) -> bool {
        self.exactly(n, u8::is_ascii_digit)
    }

    fn letters(&mut self, n: usize) -> bool {
        self.exactly(n, u8::is_ascii_alphabetic)
    }

    fn upper(&mut self, n: usize) -> bool {
        self.exactly(n, u8::is_ascii_uppercase)
    }

    /// Greedily consume up to `max` digits; returns the count, or 0 (and
    /// consumes nothing) when fewer than `min` are available
    fn digits_between(&mut self, min: usize, max: usize) -> usize {
        let run = self.bytes[self.pos..]
            .iter()
            .take(max)
            .take_while(|b| b.is_ascii_digit())
            .count();
        if run < min {
            return 0;
        }
        self.pos += run;
        run
    }
}

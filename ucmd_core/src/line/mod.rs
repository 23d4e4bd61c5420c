use crate::config::LINE_BUFF_SIZE;

/// Carriage return, accepted as end-of-line marker.
pub const LINE_CHAR_CR: u8 = b'\r';
/// Line feed, accepted as end-of-line marker.
pub const LINE_CHAR_LF: u8 = b'\n';
/// Space, ignored while the buffer is empty.
pub const LINE_CHAR_SPACE: u8 = b' ';
/// Terminator stored in place of the end-of-line marker.
pub const LINE_CHAR_NUL: u8 = 0;

/// Receiver of one byte per call, driven by a peripheral (typically a UART
/// receive interrupt or a polling loop).
///
/// Calls must be strictly serial; nothing here guards against re-entrant delivery.
pub trait CharSink {
    /// Consumes one received byte.
    fn on_char(&mut self, ch: u8);
}

/// A fixed-size, heapless line buffer fed one character at a time.
///
/// `LineAssembler` collects received bytes until a CR or LF completes the
/// line, which is then stored NUL-terminated. A line that would not fit
/// (together with its terminator) puts the assembler in the overflowed
/// state: the content is dropped and every byte is discarded until the next
/// end-of-line marker resynchronizes it.
///
/// NUL bytes are dropped on arrival; every other byte is stored as received,
/// so a line holding non-UTF-8 bytes has no [`line`](Self::line) view.
///
/// Nothing is reported as an error; callers observe the state flags.
///
/// # Type Parameters
/// - `N`: Buffer capacity in bytes, terminator included.
pub struct LineAssembler<const N: usize = LINE_BUFF_SIZE> {
    buffer: [u8; N],
    count: usize,
    full: bool,
    overflowed: bool,
    complete: bool,
}

impl<const N: usize> LineAssembler<N> {
    /// Creates a new, empty `LineAssembler`.
    ///
    /// # Example
    /// ```
    /// let line: LineAssembler<16> = LineAssembler::new();
    /// assert!(line.is_empty());
    /// ```
    pub const fn new() -> Self {
        const { assert!(N > 0, "line buffer capacity must be non-zero") };
        Self {
            buffer: [LINE_CHAR_NUL; N],
            count: 0,
            full: false,
            overflowed: false,
            complete: false,
        }
    }

    /// Resets the assembler to the empty state, overflow included.
    ///
    /// Idempotent; call it once before the peripheral starts delivering bytes.
    pub fn init(&mut self) {
        *self = Self::new();
        log_trace!("line: init, capacity {}", N);
    }

    /// Processes one received byte.
    ///
    /// # Example
    /// ```
    /// let mut line: LineAssembler<16> = LineAssembler::new();
    /// line.push_char(b'a');
    /// line.push_char(b'\r');
    /// assert!(line.is_complete());
    /// ```
    pub fn push_char(&mut self, ch: u8) {
        let eol = is_eol(ch);

        if self.overflowed {
            if eol {
                self.overflowed = false;
                log_debug!("line: resynchronized");
            }
            return;
        }

        // A stored NUL would cut the line short for C-string readers.
        if ch == LINE_CHAR_NUL {
            return;
        }

        // Leading separators never start a line.
        if self.count == 0 && (eol || ch == LINE_CHAR_SPACE) {
            return;
        }

        if self.full || self.complete {
            return;
        }

        if eol {
            self.buffer[self.count] = LINE_CHAR_NUL;
            self.count += 1;
            self.complete = true;
            self.full = self.count == N;
            log_trace!("line: complete, {} bytes", self.count);
            return;
        }

        // The last slot is reserved for the terminator.
        if self.count + 1 >= N {
            self.overflow();
            return;
        }

        self.buffer[self.count] = ch;
        self.count += 1;
    }

    /// Pushes every byte of `bytes` in order.
    pub fn feed(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.push_char(b);
        }
    }

    /// Copies the whole buffer into `out`; bytes past the logical length are zero.
    pub fn get_buffer(&self, out: &mut [u8; N]) {
        out.copy_from_slice(&self.buffer);
    }

    /// Returns the completed line without its terminator.
    ///
    /// `None` until a line is complete, or when the bytes are not valid UTF-8.
    pub fn line(&self) -> Option<&str> {
        if !self.complete {
            return None;
        }
        core::str::from_utf8(&self.buffer[..self.count - 1]).ok()
    }

    /// Number of stored bytes, terminator included once the line is complete.
    pub fn get_count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// `true` when the terminator occupies the last slot.
    pub fn is_full(&self) -> bool {
        self.full
    }

    pub fn is_overflowed(&self) -> bool {
        self.overflowed
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Zeroes the buffer and clears the count, `complete` and `full`.
    ///
    /// The overflowed state is left untouched: only an end-of-line marker
    /// (or [`init`](Self::init)) leaves it.
    pub fn flush(&mut self) {
        self.buffer = [LINE_CHAR_NUL; N];
        self.count = 0;
        self.complete = false;
        self.full = false;
    }

    fn overflow(&mut self) {
        self.flush();
        self.overflowed = true;
        log_warn!("line: overflow, discarding until end of line");
    }
}

impl<const N: usize> CharSink for LineAssembler<N> {
    fn on_char(&mut self, ch: u8) {
        self.push_char(ch);
    }
}

impl<const N: usize> Default for LineAssembler<N> {
    /// Returns a new, empty `LineAssembler`.
    fn default() -> Self {
        Self::new()
    }
}

#[inline(always)]
const fn is_eol(ch: u8) -> bool {
    ch == LINE_CHAR_CR || ch == LINE_CHAR_LF
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: usize = LINE_BUFF_SIZE;

    /// Stands in for the UART driver: delivers bytes to whatever sink it is wired to.
    struct MockUart<'a, S: CharSink> {
        sink: &'a mut S,
    }

    impl<'a, S: CharSink> MockUart<'a, S> {
        fn send(&mut self, ch: u8) {
            self.sink.on_char(ch);
        }

        fn send_all(&mut self, bytes: &[u8]) {
            for &b in bytes {
                self.send(b);
            }
        }
    }

    fn fill(line: &mut LineAssembler<SIZE>, val: u8) {
        let mut uart = MockUart { sink: line };
        for _ in 0..SIZE - 1 {
            uart.send(val);
        }
        // Anything but an end-of-line marker here would overflow.
        uart.send(LINE_CHAR_CR);
    }

    #[test]
    fn init_leaves_buffer_empty_and_zeroed() {
        let mut line = LineAssembler::<SIZE>::new();
        line.feed(b"abc");
        line.init();

        let mut out = [b'x'; SIZE];
        line.get_buffer(&mut out);
        assert!(out.iter().all(|&b| b == 0));
        assert!(line.is_empty());
        assert_eq!(line.get_count(), 0);
        assert!(!line.is_full());
        assert!(!line.is_complete());

        line.init();
        assert!(line.is_empty());
    }

    #[test]
    fn characters_accumulate() {
        let mut line = LineAssembler::<SIZE>::new();
        line.push_char(b'a');
        assert_eq!(line.get_count(), 1);
        line.push_char(b'b');

        let mut out = [0u8; SIZE];
        line.get_buffer(&mut out);
        assert_eq!(&out[..2], b"ab");
        assert_eq!(line.get_count(), 2);
        assert!(!line.is_complete());
    }

    #[test]
    fn full_line_ignores_further_characters() {
        let mut line = LineAssembler::<SIZE>::new();
        fill(&mut line, b'a');
        assert!(line.is_full());

        let count = line.get_count();
        line.push_char(b'a');
        assert_eq!(line.get_count(), count);
    }

    #[test]
    fn leading_separators_are_ignored() {
        let mut line = LineAssembler::<SIZE>::new();
        line.push_char(LINE_CHAR_LF);
        line.push_char(LINE_CHAR_CR);
        line.push_char(LINE_CHAR_SPACE);
        assert!(line.is_empty());
        assert!(!line.is_complete());

        line.push_char(b'a');
        assert_eq!(line.get_count(), 1);
        line.push_char(LINE_CHAR_CR);
        assert_eq!(line.get_count(), 2);
        assert!(line.is_complete());
        assert_eq!(line.line(), Some("a"));
    }

    #[test]
    fn nul_bytes_are_dropped() {
        let mut line = LineAssembler::<SIZE>::new();
        line.feed(b"\0ab\0c\r");
        assert_eq!(line.line(), Some("abc"));
        assert_eq!(line.get_count(), 4);

        let mut out = [0xFFu8; SIZE];
        line.get_buffer(&mut out);
        assert_eq!(&out[..4], b"abc\0");
    }

    #[test]
    fn non_utf8_line_has_no_text_view() {
        let mut line = LineAssembler::<SIZE>::new();
        line.feed(&[b'a', 0xFF, b'\n']);
        assert!(line.is_complete());
        assert_eq!(line.get_count(), 3);
        assert_eq!(line.line(), None);
    }

    #[test]
    fn inner_spaces_are_kept() {
        let mut line = LineAssembler::<SIZE>::new();
        line.feed(b"  ab c\n");
        assert_eq!(line.line(), Some("ab c"));
    }

    #[test]
    fn flush_zeroes_everything() {
        let mut line = LineAssembler::<SIZE>::new();
        fill(&mut line, b'a');

        let mut out = [0u8; SIZE];
        line.get_buffer(&mut out);
        assert!(out[..SIZE - 1].iter().all(|&b| b == b'a'));
        assert_eq!(out[SIZE - 1], LINE_CHAR_NUL);

        line.flush();
        line.get_buffer(&mut out);
        assert!(out.iter().all(|&b| b == 0));
        assert_eq!(line.get_count(), 0);
        assert!(!line.is_full());
        assert!(!line.is_complete());
    }

    #[test]
    fn completion_on_cr_and_lf() {
        let mut line = LineAssembler::<SIZE>::new();
        line.push_char(b'a');
        line.push_char(LINE_CHAR_CR);
        assert!(line.is_complete());
        line.flush();
        assert!(!line.is_complete());

        line.push_char(b'a');
        line.push_char(LINE_CHAR_LF);
        assert!(line.is_complete());
        line.flush();
        assert!(!line.is_complete());
    }

    #[test]
    fn partial_line_reads_back_nul_terminated() {
        let mut line = LineAssembler::<SIZE>::new();
        line.feed(b"azdq");

        let mut out = [0xFFu8; SIZE];
        line.get_buffer(&mut out);
        assert_eq!(&out[..5], b"azdq\0");
        assert_eq!(line.line(), None);
    }

    #[test]
    fn longest_line_without_overflow() {
        let mut line = LineAssembler::<SIZE>::new();
        line.feed(b"abdlkslfkdlqksu\n");
        assert!(line.is_full());
        assert!(!line.is_overflowed());
        assert!(line.is_complete());
        assert_eq!(line.get_count(), SIZE);

        // Still full: the second line is ignored, not appended.
        line.feed(b"abdlkslfkdlqksu\r");
        assert!(line.is_full());
        assert!(!line.is_overflowed());
        assert!(line.is_complete());
        assert_eq!(line.line(), Some("abdlkslfkdlqksu"));

        line.flush();
        line.feed(b"abdlkslfkdlqksuz");
        assert!(line.is_empty());
        assert!(line.is_overflowed());
        assert!(!line.is_complete());
        assert!(!line.is_full());
    }

    #[test]
    fn overflow_discards_until_end_of_line() {
        let mut line = LineAssembler::<SIZE>::new();
        for _ in 0..SIZE - 1 {
            line.push_char(b'a');
            assert!(!line.is_overflowed());
        }
        line.push_char(b'a');
        assert!(line.is_overflowed());
        assert!(line.is_empty());
        assert_eq!(line.get_count(), 0);

        let mut uart = MockUart { sink: &mut line };
        uart.send_all(b"adlz");
        assert!(line.is_empty());
        assert!(line.is_overflowed());

        line.push_char(LINE_CHAR_CR);
        assert!(!line.is_overflowed());
        assert!(line.is_empty());
        assert!(!line.is_complete());

        line.feed(b"ad");
        assert!(!line.is_empty());
        assert_eq!(line.get_count(), 2);
    }

    #[test]
    fn flush_does_not_leave_overflow() {
        let mut line = LineAssembler::<SIZE>::new();
        line.feed(&[b'x'; SIZE]);
        assert!(line.is_overflowed());

        line.flush();
        assert!(line.is_overflowed());
        line.push_char(b'a');
        assert!(line.is_empty());

        line.init();
        assert!(!line.is_overflowed());
        line.push_char(b'a');
        assert_eq!(line.get_count(), 1);
    }

    #[test]
    fn smallest_buffer_only_holds_nothing() {
        let mut line = LineAssembler::<1>::new();
        line.push_char(b'a');
        assert!(line.is_overflowed());
        line.push_char(LINE_CHAR_LF);
        assert!(!line.is_overflowed());
        assert!(line.is_empty());
    }
}

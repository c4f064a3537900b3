use log::info;

/// Writes every `interval`-th message; frame callbacks arrive far too often to log each one.
pub(crate) struct ThrottledInfoLogger {
    interval: usize,
    counter: usize,
}

impl ThrottledInfoLogger {
    #[must_use]
    pub(crate) fn new(interval: usize) -> Self {
        assert!(interval > 0, "interval must be greater than 0");
        Self {
            interval,
            counter: 0,
        }
    }

    /// Returns `true` when the message was written.
    pub(crate) fn do_write<Message: FnOnce() -> String>(&mut self, message: Message) -> bool {
        self.counter = self.counter.wrapping_add(1);
        if self.counter % self.interval == 0 {
            info!("{}", message());
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_every_interval() {
        let mut system_under_test = ThrottledInfoLogger::new(3);

        let written: Vec<bool> = (0..6).map(|_| system_under_test.do_write(|| "frame".to_string())).collect();

        assert_eq!(written, vec![false, false, true, false, false, true]);
    }

    #[test]
    #[should_panic]
    fn test_zero_interval_is_rejected() {
        let _ = ThrottledInfoLogger::new(0);
    }
}

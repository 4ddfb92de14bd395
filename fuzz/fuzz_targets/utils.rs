use std::str;
use std::sync::mpsc;
use std::sync::Mutex;
use std::time::Duration;

pub const MAX_INPUT_SIZE: usize = 64 * 1024;

/// Returns a UTF-8 view of `data` truncated to `MAX_INPUT_SIZE`.
///
/// If the truncated data is not valid UTF-8, only up to 3 trailing bytes are
/// trimmed to recover from cutting a multibyte codepoint.
#[inline]
pub fn truncate_utf8(data: &[u8]) -> Option<&str> {
    let cap = data.len().min(MAX_INPUT_SIZE);
    for trim in 0..=3 {
        if cap < trim {
            break;
        }
        let slice = &data[..cap - trim];
        if let Ok(text) = str::from_utf8(slice) {
            return Some(text);
        }
    }
    None
}

/// Runs each input on a worker thread and panics if one takes longer than `timeout`.
pub struct TimedRunner {
    name: &'static str,
    timeout: Duration,
    input_tx: mpsc::SyncSender<String>,
    output_rx: Mutex<mpsc::Receiver<()>>,
}

impl TimedRunner {
    pub fn new(name: &'static str, timeout: Duration, run_one: fn(&str)) -> Self {
        let (input_tx, input_rx) = mpsc::sync_channel::<String>(0);
        let (output_tx, output_rx) = mpsc::sync_channel::<()>(0);
        std::thread::spawn(move || {
            for input in input_rx {
                run_one(&input);
                let _ = output_tx.send(());
            }
        });
        Self {
            name,
            timeout,
            input_tx,
            output_rx: Mutex::new(output_rx),
        }
    }

    pub fn run(&self, data: &[u8]) {
        let Some(text) = truncate_utf8(data) else {
            return;
        };
        let name = self.name;
        self.input_tx
            .send(text.to_owned())
            .unwrap_or_else(|_| panic!("{name} worker thread exited"));
        let received = self
            .output_rx
            .lock()
            .unwrap_or_else(|_| panic!("{name} worker receiver poisoned"))
            .recv_timeout(self.timeout);
        match received {
            Ok(()) => {}
            Err(mpsc::RecvTimeoutError::Timeout) => panic!("{name} fuzz target timed out"),
            Err(mpsc::RecvTimeoutError::Disconnected) => panic!("{name} worker thread panicked"),
        }
    }
}

use uuid::Uuid;

/// Key alphabet, in ASCII order so that keys sort the same way as bytes.
const PUSH_CHARS: &[u8; 64] = b"-0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";

const TIMESTAMP_LEN: usize = 8;
const RANDOM_LEN: usize = 12;

/// Length of every generated key.
pub const PUSH_ID_LEN: usize = TIMESTAMP_LEN + RANDOM_LEN;

/// Generates time-ordered message keys.
///
/// The first 8 characters encode the millisecond timestamp, the last 12 are
/// random. Keys made within the same millisecond reuse the previous random
/// suffix incremented by one, so they still sort in creation order.
#[derive(Debug, Default)]
pub struct PushIdGenerator {
    last_millis: Option<u64>,
    last_random: [u8; RANDOM_LEN],
}

impl PushIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self, now_millis: u64) -> String {
        if self.last_millis == Some(now_millis) {
            self.increment_random();
        } else {
            self.fresh_random();
        }
        self.last_millis = Some(now_millis);

        let mut key = [0u8; PUSH_ID_LEN];
        let mut ts = now_millis;
        for slot in key[..TIMESTAMP_LEN].iter_mut().rev() {
            *slot = PUSH_CHARS[(ts % 64) as usize];
            ts /= 64;
        }
        for (slot, r) in key[TIMESTAMP_LEN..].iter_mut().zip(self.last_random.iter()) {
            *slot = PUSH_CHARS[*r as usize];
        }
        key.iter().map(|&b| b as char).collect()
    }

    fn fresh_random(&mut self) {
        let bytes = Uuid::new_v4().into_bytes();
        for (r, b) in self.last_random.iter_mut().zip(bytes.iter()) {
            *r = b & 63;
        }
    }

    /// An all-`z` suffix wraps to all `-`, so that one key sorts before its predecessor (1 in 64^12).
    fn increment_random(&mut self) {
        for r in self.last_random.iter_mut().rev() {
            if *r == 63 {
                *r = 0;
            } else {
                *r += 1;
                break;
            }
        }
    }
}

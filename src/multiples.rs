//! Multiple finder.
//!
//! Computes the ascending, de-duplicated union of the multiples of two
//! steps below a limit by walking both progressions with two cursors.
//! Runs in O(limit/x + limit/y) without materializing either progression.

use std::num::NonZeroU64;

/// Multiples found for one `x y limit` task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiplesResult {
    /// Number of distinct multiples below the limit.
    pub count: u64,
    /// `"<limit>: <m1> <m2> ... <mk> "`, without a newline.
    pub rendered: String,
}

impl MultiplesResult {
    /// The rendered text followed by a newline, as committed to the output.
    pub fn line(&self) -> String {
        let mut line = String::with_capacity(self.rendered.len() + 1);
        line.push_str(&self.rendered);
        line.push('\n');
        line
    }
}

/// Find every number below `limit` that is a multiple of `x` or `y`.
///
/// Numbers divisible by both appear once.
///
/// # Example
///
/// ```
/// use multisort::multiples::find_multiples;
/// use std::num::NonZeroU64;
///
/// let x = NonZeroU64::new(3).unwrap();
/// let y = NonZeroU64::new(5).unwrap();
/// let result = find_multiples(x, y, 16);
///
/// assert_eq!(result.count, 7);
/// assert_eq!(result.rendered, "16: 3 5 6 9 10 12 15 ");
/// ```
pub fn find_multiples(x: NonZeroU64, y: NonZeroU64, limit: i64) -> MultiplesResult {
    let mut itoa_buf = itoa::Buffer::new();
    let mut rendered = String::with_capacity(32);
    rendered.push_str(itoa_buf.format(limit));
    rendered.push_str(": ");

    if limit <= 0 {
        return MultiplesResult { count: 0, rendered };
    }

    let limit = limit as u64;
    let (x, y) = (x.get(), y.get());
    let mut cursor_x = x;
    let mut cursor_y = y;
    let mut count = 0u64;

    while cursor_x < limit || cursor_y < limit {
        let value = if cursor_x == cursor_y {
            let v = cursor_x;
            cursor_x = cursor_x.saturating_add(x);
            cursor_y = cursor_y.saturating_add(y);
            v
        } else if cursor_x < cursor_y {
            let v = cursor_x;
            cursor_x = cursor_x.saturating_add(x);
            v
        } else {
            let v = cursor_y;
            cursor_y = cursor_y.saturating_add(y);
            v
        };

        rendered.push_str(itoa_buf.format(value));
        rendered.push(' ');
        count += 1;
    }

    MultiplesResult { count, rendered }
}

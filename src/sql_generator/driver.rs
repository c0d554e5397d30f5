//! The connection seam. Compilation never executes anything; the only calls
//! that reach the driver are platform identification (once, to pick the
//! dialect) and literal quoting.

use super::dialect::Platform;

/// What the compiler needs from the underlying database connection.
pub trait Connection {
    /// Platform identity of the connected backend.
    fn platform(&self) -> Platform;

    /// Driver-escaped, quoted SQL string literal for `text`.
    fn quote(&self, text: &str) -> String;
}

/// A connection stand-in with a fixed platform and ANSI quote doubling.
/// Suitable for drivers without special escaping rules, and for tests.
#[derive(Debug, Clone)]
pub struct StaticConnection {
    platform: Platform,
}

impl StaticConnection {
    pub fn new(platform: Platform) -> Self {
        StaticConnection { platform }
    }
}

impl Connection for StaticConnection {
    fn platform(&self) -> Platform {
        self.platform.clone()
    }

    fn quote(&self, text: &str) -> String {
        format!("'{}'", text.replace('\'', "''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoting_doubles_embedded_single_quotes() {
        let conn = StaticConnection::new(Platform::Sqlite);
        assert_eq!(conn.quote("o'clock"), "'o''clock'");
        assert_eq!(conn.quote("plain"), "'plain'");
    }
}

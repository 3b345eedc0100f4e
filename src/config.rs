use chaintable::DEFAULT_BUCKET_COUNT;

use crate::DumpError;

pub const USAGE: &str = "usage: htdump [--buckets N] [--stats] [key=value ...]
  reads key=value lines from stdin when no pairs are given";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub buckets: usize,
    pub stats: bool,
    pub help: bool,
    /// Pairs given on the command line; empty means read stdin
    pub pairs: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            buckets: DEFAULT_BUCKET_COUNT,
            stats: false,
            help: false,
            pairs: Vec::new(),
        }
    }
}

impl Config {
    /// Parses the arguments after the program name
    pub fn from_args<I>(args: I) -> Result<Self, DumpError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Config::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-b" | "--buckets" => {
                    let n = args
                        .next()
                        .ok_or_else(|| DumpError::InvalidArgs(format!("{arg} needs a value")))?;
                    config.buckets = parse_buckets(&n)?;
                }
                "-s" | "--stats" => config.stats = true,
                "-h" | "--help" => config.help = true,
                other => {
                    if let Some(n) = other.strip_prefix("--buckets=") {
                        config.buckets = parse_buckets(n)?;
                    } else if other.starts_with('-') {
                        return Err(DumpError::InvalidArgs(format!("unknown flag {other}")));
                    } else {
                        config.pairs.push(other.to_string());
                    }
                }
            }
        }

        Ok(config)
    }
}

fn parse_buckets(n: &str) -> Result<usize, DumpError> {
    match n.parse::<usize>() {
        Ok(0) => Err(DumpError::InvalidArgs("bucket count must be at least 1".into())),
        Ok(n) => Ok(n),
        Err(e) => Err(DumpError::InvalidArgs(format!("bucket count {n:?}: {e}"))),
    }
}

#[cfg(test)]
mod test {
    use super::Config;
    use crate::DumpError;

    fn parse(args: &[&str]) -> Result<Config, DumpError> {
        Config::from_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn defaults() {
        let c = parse(&[]).unwrap();
        assert_eq!(c, Config::default());
        assert_eq!(c.buckets, 16);
        assert!(c.pairs.is_empty());
    }

    #[test]
    fn flags_and_pairs() {
        let c = parse(&["-b", "7", "GFG=GeeksforGeeks", "--stats", "pluto14=Vartika"]).unwrap();
        assert_eq!(c.buckets, 7);
        assert!(c.stats);
        assert_eq!(c.pairs, ["GFG=GeeksforGeeks", "pluto14=Vartika"]);

        let c = parse(&["--buckets=3"]).unwrap();
        assert_eq!(c.buckets, 3);
    }

    #[test]
    fn rejects_bad_bucket_counts() {
        assert!(matches!(parse(&["-b", "0"]), Err(DumpError::InvalidArgs(_))));
        assert!(matches!(parse(&["-b", "many"]), Err(DumpError::InvalidArgs(_))));
        assert!(matches!(parse(&["--buckets"]), Err(DumpError::InvalidArgs(_))));
    }

    #[test]
    fn rejects_unknown_flags() {
        let err = parse(&["--rehash"]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid arguments: unknown flag --rehash");
    }
}

//! Interactive Command Loop
//!
//! Line-oriented front end over the cached fetch layer: reads commands from
//! stdin, dispatches them against a small command table, and keeps a record
//! of previously fetched resources.

use std::collections::HashMap;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::client::CachedClient;

const PROMPT: &str = "fetchcache > ";

// == Fetch Record ==
/// One remembered fetch: how big the body was and how often it was asked
/// for.
#[derive(Debug, Clone)]
pub struct FetchRecord {
    /// Size of the most recent body, in bytes
    pub bytes: usize,
    /// How many times this URL has been requested
    pub fetches: u64,
    /// Whether the most recent request was served from the cache
    pub last_from_cache: bool,
}

// == Repl ==
/// REPL state: the client plus the record of everything fetched so far.
pub struct Repl {
    client: CachedClient,
    fetched: HashMap<String, FetchRecord>,
}

impl Repl {
    /// Creates a loop around `client` with an empty fetch record.
    pub fn new(client: CachedClient) -> Self {
        Self {
            client,
            fetched: HashMap::new(),
        }
    }

    /// Runs until `exit` or end of input.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        loop {
            stdout.write_all(PROMPT.as_bytes()).await?;
            stdout.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            let words = parse_line(&line);
            let Some((command, args)) = words.split_first() else {
                continue;
            };

            match command.as_str() {
                "help" => self.cmd_help(),
                "get" => self.cmd_get(args).await,
                "history" => self.cmd_history(),
                "stats" => self.cmd_stats().await,
                "exit" => break,
                other => println!("Unknown command {other:?}. Try \"help\"."),
            }
        }

        Ok(())
    }

    fn cmd_help(&self) {
        println!("Commands:");
        println!("  help         Show this message");
        println!("  get <url>    Fetch a URL through the cache");
        println!("  history      List previously fetched URLs");
        println!("  stats        Show cache counters");
        println!("  exit         Quit");
    }

    async fn cmd_get(&mut self, args: &[String]) {
        let Some(url) = args.first() else {
            println!("Usage: get <url>");
            return;
        };

        match self.client.fetch(url).await {
            Ok(fetched) => {
                let source = if fetched.from_cache { "cache" } else { "network" };
                println!("{} bytes from {source} for {url}", fetched.body.len());

                let record = self.fetched.entry(url.clone()).or_insert(FetchRecord {
                    bytes: 0,
                    fetches: 0,
                    last_from_cache: false,
                });
                record.bytes = fetched.body.len();
                record.fetches += 1;
                record.last_from_cache = fetched.from_cache;
            }
            Err(err) => println!("Error: {err}"),
        }
    }

    fn cmd_history(&self) {
        if self.fetched.is_empty() {
            println!("Nothing fetched yet.");
            return;
        }

        let mut urls: Vec<&String> = self.fetched.keys().collect();
        urls.sort();
        for url in urls {
            let record = &self.fetched[url];
            println!(
                "{url}  ({} bytes, {} fetches, last from {})",
                record.bytes,
                record.fetches,
                if record.last_from_cache { "cache" } else { "network" },
            );
        }
    }

    async fn cmd_stats(&self) {
        let stats = self.client.cache().stats().await;
        println!("entries:        {}", stats.entries);
        println!("hits:           {}", stats.hits);
        println!("misses:         {}", stats.misses);
        println!("lazy evictions: {}", stats.lazy_evictions);
        println!("swept:          {}", stats.swept);
        println!("hit rate:       {:.2}", stats.hit_rate());
    }
}

/// Splits an input line into words, lowercasing only the leading command so
/// URLs and other arguments keep their case.
fn parse_line(input: &str) -> Vec<String> {
    let mut words: Vec<String> = input.split_whitespace().map(str::to_string).collect();
    if let Some(first) = words.first_mut() {
        *first = first.to_lowercase();
    }
    words
}

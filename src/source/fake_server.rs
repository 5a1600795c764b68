//! Deterministic fake filesystem backend with simulated latency and errors.
//!
//! Listings are generated from a seeded PRNG keyed by parent id, so the same
//! (seed, parent) pair always yields the same items with the same stable
//! identifiers — a requirement of the tree core, which keys all state by id.
//! Failures are drawn per (parent, attempt), so a folder that failed once
//! can succeed on retry while staying reproducible under a fixed seed.

use crate::model::{FileKind, FsItem, LoadError, NodeId};
use crate::source::ChildSource;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;
use tracing::trace;

const ADJECTIVES: [&str; 10] = [
    "liable", "moaning", "safe", "integrated", "guilty", "gentle", "rapid", "silent", "brave",
    "curious",
];
const ANIMALS: [&str; 10] = [
    "owl", "tapir", "ostrich", "bass", "egret", "fox", "koala", "panda", "wolf", "tiger",
];

/// Folders the root listing must contain so the demo always has something to
/// expand.
const ROOT_MIN_FOLDERS: usize = 2;

/// Tuning knobs for the fake server.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServerOptions {
    /// Simulated latency per uncached fetch.
    pub delay: Duration,
    /// Probability in `0.0..=1.0` that an uncached fetch fails.
    pub error_rate: f64,
    /// Minimum items per listing.
    pub min_items: usize,
    /// Maximum items per listing.
    pub max_items: usize,
    /// Seed for all deterministic generation.
    pub seed: u32,
    /// Probability that a generated item is a folder.
    pub folder_ratio: f64,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(1000),
            error_rate: 0.0,
            min_items: 1,
            max_items: 5,
            seed: 1337,
            folder_ratio: 0.35,
        }
    }
}

/// Fake filesystem server: deterministic listings, simulated latency, and a
/// per-parent cache (a repeat fetch returns instantly and never fails).
pub struct FakeFsServer {
    opts: ServerOptions,
    cache: Mutex<HashMap<NodeId, Vec<FsItem>>>,
    attempts: Mutex<HashMap<NodeId, u32>>,
}

impl FakeFsServer {
    /// Create a server with the given options.
    pub fn new(opts: ServerOptions) -> Self {
        Self {
            opts,
            cache: Mutex::new(HashMap::new()),
            attempts: Mutex::new(HashMap::new()),
        }
    }

    /// Drop all cached listings. Subsequent fetches regenerate (identically,
    /// given the same seed) with latency and error draws applied again.
    pub fn clear_cache(&self) {
        self.cache.lock().expect("cache mutex poisoned").clear();
    }

    /// The options this server was built with.
    pub fn options(&self) -> ServerOptions {
        self.opts
    }

    fn generate_listing(&self, parent: &NodeId) -> Vec<FsItem> {
        let mut rng = Mulberry32::new(mix_hash(&format!("data::{parent}"), self.opts.seed));
        let is_root = parent.is_root();

        let (min_items, max_items) = if is_root {
            (self.opts.min_items.max(3), self.opts.max_items.max(6))
        } else {
            (self.opts.min_items, self.opts.max_items)
        };
        let count = rng.range(min_items, max_items.max(min_items));
        let folders_needed = if is_root { ROOT_MIN_FOLDERS } else { 0 };

        let mut used_names: HashSet<String> = HashSet::new();
        let mut items: Vec<FsItem> = Vec::with_capacity(count);
        let mut rejected = 0usize;

        while items.len() < count {
            let mut base = format!("{}-{}", rng.pick(&ADJECTIVES), rng.pick(&ANIMALS));
            // Small word lists collide eventually; suffix rather than spin.
            rejected += 1;
            if rejected > 100 {
                base.push_str(&format!("-{}", items.len()));
            }

            let current_folders = items.iter().filter(|i| matches!(i, FsItem::Folder { .. })).count();
            let is_folder = current_folders < folders_needed || rng.next_f64() < self.opts.folder_ratio;

            if is_folder {
                if !used_names.insert(base.clone()) {
                    continue;
                }
                let id = stable_id(parent, &base, self.opts.seed);
                items.push(FsItem::Folder { id, name: base });
            } else {
                let kind = *rng.pick(&FileKind::ALL);
                let name = format!("{}.{}", base, kind.extension());
                if !used_names.insert(name.clone()) {
                    continue;
                }
                let id = stable_id(parent, &name, self.opts.seed);
                let size_bytes = random_size(&mut rng, kind);
                items.push(FsItem::File {
                    id,
                    name,
                    kind,
                    size_bytes,
                });
            }
        }

        items
    }
}

impl ChildSource<FsItem> for FakeFsServer {
    fn fetch_children(&self, parent: &NodeId) -> Result<Vec<FsItem>, LoadError> {
        if let Some(cached) = self.cache.lock().expect("cache mutex poisoned").get(parent) {
            trace!(parent = %parent, "listing served from server cache");
            return Ok(cached.clone());
        }

        thread::sleep(self.opts.delay);

        if self.opts.error_rate > 0.0 {
            let attempt = {
                let mut attempts = self.attempts.lock().expect("attempts mutex poisoned");
                let counter = attempts.entry(parent.clone()).or_insert(0);
                *counter += 1;
                *counter
            };
            let mut err_rng =
                Mulberry32::new(mix_hash(&format!("err::{parent}::{attempt}"), self.opts.seed));
            if err_rng.next_f64() < self.opts.error_rate {
                return Err(LoadError::new(
                    "Fake server error: failed to load folder children",
                ));
            }
        }

        let items = self.generate_listing(parent);
        self.cache
            .lock()
            .expect("cache mutex poisoned")
            .insert(parent.clone(), items.clone());
        Ok(items)
    }
}

/// Mulberry32: a tiny 32-bit seeded PRNG, plenty for fake data.
struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let t = self.state;
        let mut x = (t ^ (t >> 15)).wrapping_mul(t | 1);
        x ^= x.wrapping_add((x ^ (x >> 7)).wrapping_mul(x | 61));
        x ^ (x >> 14)
    }

    /// Uniform draw in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }

    /// Inclusive integer range.
    fn range(&mut self, min: usize, max: usize) -> usize {
        min + (self.next_f64() * (max - min + 1) as f64) as usize
    }

    fn pick<'a, T>(&mut self, options: &'a [T]) -> &'a T {
        &options[self.range(0, options.len() - 1)]
    }
}

/// FNV-1a with the seed folded in; truncated to 32 bits for short id hashes.
fn mix_hash(input: &str, seed: u32) -> u32 {
    let mut hash: u64 = 0xCBF2_9CE4_8422_2325 ^ u64::from(seed).wrapping_mul(0x0100_0000_01B3);
    for byte in input.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0100_0000_01B3);
    }
    (hash ^ (hash >> 32)) as u32
}

fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Stable child id: `{parent}/{slug}-{hash}`. Hashing (parent, name, seed)
/// keeps ids identical across refetches of the same parent.
fn stable_id(parent: &NodeId, name: &str, seed: u32) -> NodeId {
    let hash = mix_hash(&format!("{parent}::{name}"), seed);
    NodeId::new(format!("{}/{}-{:x}", parent, slugify(name), hash))
        .expect("generated ids are never empty")
}

fn random_size(rng: &mut Mulberry32, kind: FileKind) -> u64 {
    let (min, max) = match kind {
        FileKind::Png => (10_000, 3_000_000),
        FileKind::Mp3 => (1_000_000, 10_000_000),
        FileKind::Mp4 => (5_000_000, 200_000_000),
        FileKind::Zip => (200_000, 50_000_000),
        FileKind::Pdf => (50_000, 8_000_000),
        FileKind::Tsx | FileKind::Json | FileKind::Txt => (200, 200_000),
        FileKind::Doc => (5_000, 2_000_000),
    };
    rng.range(min, max) as u64
}

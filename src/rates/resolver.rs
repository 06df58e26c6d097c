//! Ordered fallback over the configured rate sources.

use crate::rates::{RateSource, SourcedQuote};

/// Tries sources strictly in the declared priority order and stops at the
/// first one that answers. Sources are never raced.
pub struct FallbackResolver {
    sources: Vec<Box<dyn RateSource>>,
}

impl FallbackResolver {
    pub fn new(sources: Vec<Box<dyn RateSource>>) -> Self {
        Self { sources }
    }

    /// First successful quote, tagged with its source name. `None` when
    /// every source reported unavailable.
    pub async fn resolve(&self) -> Option<SourcedQuote> {
        for source in &self.sources {
            match source.fetch().await {
                Ok(quote) => {
                    tracing::info!("Resolved {} via {}", quote.pair(), source.name());
                    return Some(SourcedQuote {
                        quote,
                        source: source.name(),
                    });
                }
                Err(err) => tracing::warn!("{} unavailable: {err:#}", source.name()),
            }
        }
        None
    }
}

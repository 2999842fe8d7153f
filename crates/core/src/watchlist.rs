//! Tracked symbol list
//!
//! Order matters: comparison records are produced in watch-list order before
//! ranking, which keeps equal-spread ties deterministic.

/// Top 100 symbols by market cap, bare base-asset tickers
pub const DEFAULT_SYMBOLS: [&str; 100] = [
    "BTC", "ETH", "BNB", "XRP", "ADA", "DOGE", "SOL", "DOT", "MATIC", "LTC",
    "SHIB", "TRX", "AVAX", "LINK", "ATOM", "UNI", "ETC", "XMR", "XLM", "BCH",
    "APT", "FIL", "LDO", "ARB", "NEAR", "VET", "ALGO", "QNT", "GRT", "AAVE",
    "EOS", "STX", "EGLD", "SAND", "THETA", "AXS", "IMX", "MANA", "XTZ", "NEO",
    "KCS", "FLOW", "CHZ", "CRV", "KAVA", "GALA", "FTM", "MINA", "ZEC", "DASH",
    "ENJ", "BAT", "LRC", "QTUM", "ZIL", "ONE", "HOT", "ENS", "COMP", "SNX",
    "1INCH", "YFI", "SUSHI", "ANKR", "CVC", "OMG", "ICX", "SC", "ZEN", "WAVES",
    "IOST", "ONT", "WRX", "RVN", "CELR", "COTI", "STORJ", "FET", "OCEAN", "BAND",
    "SKL", "DENT", "SXP", "REEF", "ALICE", "TLM", "LINA", "PERL", "HARD", "DODO",
    "ALPHA", "TORN", "BURGER", "SFP", "LOOM", "VITE", "FIRO", "WING", "AKRO", "FOR",
];

/// Ordered, duplicate-free set of tracked symbols
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Watchlist {
    symbols: Vec<String>,
}

impl Watchlist {
    /// Build from any symbol list. Symbols are upper-cased, blanks and
    /// duplicates dropped, first occurrence keeps its position.
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for symbol in symbols {
            let symbol = symbol.as_ref().trim().to_uppercase();
            if symbol.is_empty() || out.contains(&symbol) {
                continue;
            }
            out.push(symbol);
        }
        Self { symbols: out }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl Default for Watchlist {
    fn default() -> Self {
        Self::new(DEFAULT_SYMBOLS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_watchlist() {
        let watchlist = Watchlist::default();
        assert_eq!(watchlist.len(), 100, "Default list must track 100 symbols");
        assert_eq!(watchlist.iter().next(), Some("BTC"));
        assert!(watchlist.iter().any(|s| s == "1INCH"));
        assert!(!watchlist.iter().any(|s| s == "USDT"));
    }

    #[test]
    fn test_normalizes_and_dedups() {
        let watchlist = Watchlist::new(["eth", "BTC", " ETH ", "", "sol"]);
        let symbols: Vec<&str> = watchlist.iter().collect();
        assert_eq!(symbols, vec!["ETH", "BTC", "SOL"]);
    }
}

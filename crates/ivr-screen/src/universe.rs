//! Predefined ticker universes.

/// A named list of tickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Universe {
    /// Lookup key, e.g. `"dow_30"`.
    pub name: &'static str,
    /// Short human-readable description.
    pub description: &'static str,
    /// Member tickers.
    pub tickers: &'static [&'static str],
}

impl Universe {
    /// Member tickers as owned strings.
    #[must_use]
    pub fn symbols(&self) -> Vec<String> {
        self.tickers.iter().map(|t| (*t).to_string()).collect()
    }
}

/// Every predefined universe.
pub const UNIVERSES: &[Universe] = &[
    Universe {
        name: "mega_caps",
        description: "Market cap above $500B",
        tickers: &["AAPL", "MSFT", "GOOGL", "AMZN", "NVDA", "META", "TSLA", "BRK-B"],
    },
    Universe {
        name: "tech",
        description: "Technology",
        tickers: &[
            "AAPL", "MSFT", "GOOGL", "META", "NVDA", "AVGO", "ORCL", "CSCO", "ADBE", "CRM", "AMD",
            "INTC", "IBM", "NOW", "INTU", "QCOM", "TXN", "AMAT", "MU", "LRCX", "KLAC", "SNPS",
            "CDNS", "MCHP",
        ],
    },
    Universe {
        name: "financials",
        description: "Banks, brokers and asset managers",
        tickers: &[
            "JPM", "BAC", "WFC", "C", "GS", "MS", "BLK", "SCHW", "AXP", "USB", "PNC", "TFC", "COF",
            "BK", "STT",
        ],
    },
    Universe {
        name: "healthcare",
        description: "Healthcare",
        tickers: &[
            "UNH", "JNJ", "LLY", "ABBV", "MRK", "PFE", "TMO", "ABT", "DHR", "BMY", "AMGN", "CVS",
            "MDT", "GILD", "CI", "ISRG", "VRTX", "REGN", "HUM", "ZTS", "BSX", "SYK", "ELV", "MCK",
        ],
    },
    Universe {
        name: "consumer_disc",
        description: "Consumer discretionary",
        tickers: &[
            "AMZN", "TSLA", "HD", "NKE", "MCD", "SBUX", "TJX", "BKNG", "LOW", "ABNB", "CMG", "MAR",
            "GM", "F", "ORLY", "AZO", "YUM", "DG", "ROST", "DHI", "LEN", "ULTA", "DPZ", "POOL",
        ],
    },
    Universe {
        name: "consumer_staples",
        description: "Consumer staples",
        tickers: &[
            "WMT", "PG", "COST", "KO", "PEP", "PM", "MO", "CL", "MDLZ", "ADM", "KMB", "GIS", "HSY",
            "K", "CHD", "CLX", "SJM", "CAG", "CPB", "MKC", "HRL", "TSN", "KHC", "KR",
        ],
    },
    Universe {
        name: "energy",
        description: "Oil, gas and midstream",
        tickers: &[
            "XOM", "CVX", "COP", "SLB", "EOG", "MPC", "PSX", "VLO", "OXY", "WMB", "HAL", "KMI",
            "BKR", "HES", "DVN", "FANG", "MRO", "APA", "OKE", "TRGP", "LNG", "EQT", "CTRA", "CHRD",
        ],
    },
    Universe {
        name: "industrials",
        description: "Industrials",
        tickers: &[
            "UPS", "HON", "BA", "UNP", "CAT", "RTX", "GE", "LMT", "DE", "MMM", "FDX", "NSC", "ETN",
            "EMR", "ITW", "CSX", "GD", "NOC", "WM", "TDG", "CARR", "PCAR", "JCI", "CMI",
        ],
    },
    Universe {
        name: "utilities",
        description: "Utilities",
        tickers: &[
            "NEE", "DUK", "SO", "D", "AEP", "EXC", "SRE", "XEL", "WEC", "ED", "ES", "AWK", "DTE",
            "PPL", "EIX", "FE", "ETR", "AEE", "CMS", "CNP", "NI", "LNT", "EVRG", "PNW",
        ],
    },
    Universe {
        name: "real_estate",
        description: "REITs and real estate services",
        tickers: &[
            "PLD", "AMT", "EQIX", "PSA", "SPG", "WELL", "O", "DLR", "CBRE", "AVB", "EQR", "VTR",
            "SBAC", "WY", "ARE", "INVH", "MAA", "ESS", "UDR", "EXR", "CPT", "HST", "SUI", "CUBE",
        ],
    },
    Universe {
        name: "materials",
        description: "Chemicals, metals and packaging",
        tickers: &[
            "LIN", "APD", "SHW", "ECL", "DD", "NEM", "FCX", "NUE", "DOW", "VMC", "MLM", "PPG",
            "CTVA", "ALB", "BALL", "IP", "PKG", "AMCR", "AVY", "CF", "MOS", "FMC", "EMN", "CE",
        ],
    },
    Universe {
        name: "communications",
        description: "Communication services",
        tickers: &[
            "GOOGL", "META", "NFLX", "DIS", "CMCSA", "T", "VZ", "TMUS", "CHTR", "EA", "TTWO",
            "WBD", "PARA", "OMC", "IPG", "FOXA", "NWSA", "MTCH", "LYV", "PINS", "SNAP", "ROKU",
            "ZM",
        ],
    },
    Universe {
        name: "dividend_aristocrats",
        description: "25+ consecutive years of dividend increases",
        tickers: &[
            "MMM", "ABT", "ABBV", "AFL", "APD", "ALB", "ADP", "AMCR", "BDX", "BF-B", "BRO", "CAH",
            "CAT", "CB", "CHRW", "CINF", "CLX", "CL", "KO", "ED", "EMR", "ESS", "EXPD", "XOM",
            "FRT", "GD", "GPC", "HRL", "IBM", "ITW", "JNJ", "KMB", "LOW", "MCD", "MDT", "MKC",
            "NDSN", "NEE", "NUE", "O", "PEP", "PG", "PPG", "ROP", "SHW", "SPGI", "SWK", "SYY",
            "TROW", "TGT", "WMT", "WST",
        ],
    },
    Universe {
        name: "etfs",
        description: "Major ETFs, for comparison",
        tickers: &["SPY", "QQQ", "DIA", "IWM", "VTI", "VEA", "VWO", "AGG", "GLD", "SLV"],
    },
    Universe {
        name: "dow_30",
        description: "Dow Jones Industrial Average",
        tickers: &[
            "AAPL", "MSFT", "JPM", "V", "UNH", "HD", "PG", "JNJ", "CVX", "MRK", "DIS", "AMGN", "BA",
            "MCD", "CRM", "CAT", "GS", "AXP", "HON", "IBM", "NKE", "CSCO", "VZ", "WMT", "MMM",
            "TRV", "DOW", "KO", "INTC", "WBA",
        ],
    },
    Universe {
        name: "value",
        description: "Typically cheap large caps",
        tickers: &[
            "BRK-B", "JPM", "BAC", "XOM", "CVX", "WFC", "C", "GS", "USB", "PNC", "WMT", "KO",
            "PEP", "PM", "MO", "T", "VZ", "IBM", "F", "GM", "MMM", "CAT", "BA", "UPS",
        ],
    },
    Universe {
        name: "growth",
        description: "High-growth names",
        tickers: &[
            "NVDA", "AMD", "TSLA", "META", "GOOGL", "AMZN", "NFLX", "CRM", "NOW", "SNOW", "DDOG",
            "NET", "CRWD", "ZS", "OKTA", "PANW", "SQ", "SHOP", "COIN", "PLTR", "U", "ABNB", "UBER",
        ],
    },
    Universe {
        name: "small_caps",
        description: "Market cap below $10B",
        tickers: &[
            "ENPH", "SEDG", "RUN", "FSLR", "PLUG", "BE", "NOVA", "AEHR", "PACW", "ZION", "WTFC",
            "ABCB", "FBIZ", "UCBI", "HBAN", "RF", "CADE", "EWBC", "BANR", "CVBF", "FFIN", "GBCI",
            "ONB", "FIBK",
        ],
    },
    Universe {
        name: "mid_caps",
        description: "Market cap between $10B and $50B",
        tickers: &[
            "FTNT", "DDOG", "CRWD", "NET", "ZS", "OKTA", "PANW", "SNOW", "SQ", "TWLO", "DOCN",
            "CFLT", "CYBR", "S", "ESTC", "TENB", "RPD", "GTLB", "PATH", "BILL", "WEAV", "PCTY",
            "APPS", "ZI",
        ],
    },
    Universe {
        name: "crypto",
        description: "Crypto-related equities",
        tickers: &["COIN", "MSTR", "RIOT", "MARA", "CLSK", "HUT", "BITF", "CIFR"],
    },
    Universe {
        name: "semiconductors",
        description: "Semiconductors",
        tickers: &[
            "NVDA", "AMD", "INTC", "TSM", "AVGO", "QCOM", "TXN", "MU", "AMAT", "LRCX", "KLAC",
            "ASML", "SNPS", "CDNS", "MCHP", "ADI", "MRVL", "NXPI", "ON", "MPWR", "ENTG", "SWKS",
            "QRVO", "WOLF",
        ],
    },
    Universe {
        name: "cloud_saas",
        description: "Cloud and SaaS",
        tickers: &[
            "CRM", "NOW", "SNOW", "DDOG", "WDAY", "ZM", "TEAM", "ADBE", "INTU", "MSFT", "ORCL",
            "SAP", "VEEV", "ANSS", "CDNS", "SNPS", "HUBS", "ZS", "OKTA", "CRWD", "NET", "CFLT",
            "DOCN", "MDB",
        ],
    },
    Universe {
        name: "china",
        description: "Chinese ADRs",
        tickers: &["BABA", "JD", "BIDU", "PDD", "NIO", "XPEV", "LI", "TME"],
    },
];

/// Looks up a universe by name, ignoring case.
#[must_use]
pub fn universe(name: &str) -> Option<&'static Universe> {
    UNIVERSES
        .iter()
        .find(|u| u.name.eq_ignore_ascii_case(name.trim()))
}

/// Names of all universes, in definition order.
#[must_use]
pub fn universe_names() -> Vec<&'static str> {
    UNIVERSES.iter().map(|u| u.name).collect()
}

/// Resolves a universe name or a comma-separated ticker list.
///
/// Tickers are trimmed and upper-cased; blanks and duplicates are dropped
/// while the first occurrence keeps its position.
#[must_use]
pub fn resolve_tickers(input: &str) -> Vec<String> {
    if let Some(universe) = universe(input) {
        return universe.symbols();
    }

    let mut tickers: Vec<String> = Vec::new();
    for raw in input.split(',') {
        let ticker = raw.trim().to_ascii_uppercase();
        if !ticker.is_empty() && !tickers.contains(&ticker) {
            tickers.push(ticker);
        }
    }
    tickers
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_lookup_case_insensitive() {
        let dow = universe("DOW_30").unwrap();
        assert_eq!(dow.name, "dow_30");
        assert_eq!(dow.tickers.len(), 30);
        assert!(universe("Mega_Caps").is_some());
        assert!(universe("nonexistent").is_none());
    }

    #[test]
    fn test_names_unique_and_lists_clean() {
        let names = universe_names();
        assert_eq!(names.len(), 23);
        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), names.len());

        for universe in UNIVERSES {
            assert!(!universe.tickers.is_empty(), "{} is empty", universe.name);
            let members: HashSet<_> = universe.tickers.iter().collect();
            assert_eq!(members.len(), universe.tickers.len(), "{}", universe.name);
        }
    }

    #[test]
    fn test_resolve_universe() {
        let tickers = resolve_tickers("china");
        assert_eq!(tickers.first().map(String::as_str), Some("BABA"));
        assert_eq!(tickers.len(), 8);
    }

    #[test]
    fn test_resolve_list() {
        assert_eq!(
            resolve_tickers(" aapl, MSFT,,ko ,AAPL"),
            vec!["AAPL".to_string(), "MSFT".to_string(), "KO".to_string()]
        );
        assert!(resolve_tickers("").is_empty());
    }
}

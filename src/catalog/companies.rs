use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyProfile {
    pub ticker: &'static str,
    pub name: &'static str,
    pub sector: &'static str,
}

const fn company(ticker: &'static str, name: &'static str, sector: &'static str) -> CompanyProfile {
    CompanyProfile {
        ticker,
        name,
        sector,
    }
}

/// Suggested universe offered on the company screen. Advisory only: the
/// selection store accepts any ticker and the reasoning service decides what
/// it can evaluate.
pub static COMPANIES: [CompanyProfile; 13] = [
    company("NVDA", "NVIDIA", "Technology"),
    company("MSFT", "Microsoft", "Technology"),
    company("GOOGL", "Alphabet", "Technology"),
    company("AMZN", "Amazon", "Technology"),
    company("AAPL", "Apple", "Technology"),
    company("XOM", "Exxon Mobil", "Energy"),
    company("CVX", "Chevron", "Energy"),
    company("PG", "Procter & Gamble", "Consumer Staples"),
    company("KO", "Coca-Cola", "Consumer Staples"),
    company("JNJ", "Johnson & Johnson", "Healthcare"),
    company("PFE", "Pfizer", "Healthcare"),
    company("JPM", "JPMorgan Chase", "Financials"),
    company("BAC", "Bank of America", "Financials"),
];

pub fn find_company(ticker: &str) -> Option<&'static CompanyProfile> {
    let ticker = ticker.trim();
    COMPANIES
        .iter()
        .find(|profile| profile.ticker.eq_ignore_ascii_case(ticker))
}

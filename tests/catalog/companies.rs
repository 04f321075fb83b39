use regime_lens::catalog::{COMPANIES, find_company};

#[test]
fn given_lowercase_ticker_when_looked_up_then_profile_is_found() {
    let profile = find_company(" nvda ").expect("NVDA is in the universe");
    assert_eq!(profile.ticker, "NVDA");
    assert_eq!(profile.sector, "Technology");
}

#[test]
fn given_ticker_outside_universe_when_looked_up_then_none() {
    assert!(find_company("TSLA").is_none());
}

#[test]
fn given_universe_when_listed_then_tickers_are_unique() {
    let mut tickers: Vec<&str> = COMPANIES.iter().map(|company| company.ticker).collect();
    tickers.sort_unstable();
    tickers.dedup();
    assert_eq!(tickers.len(), COMPANIES.len());
}

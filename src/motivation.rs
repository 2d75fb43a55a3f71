use crate::errors::AppError;
use crate::repository::{keys, Repository};
use crate::stats::date_key;
use chrono::{Datelike, NaiveDate};
use rand::seq::IndexedRandom;
use tracing::debug;

pub const QUOTES: &[&str] = &[
    "The only bad workout is the one that didn't happen.",
    "Your body can stand almost anything. It's your mind you have to convince.",
    "Don't wish for it, work for it.",
    "Sweat is magic. Cover yourself in it daily.",
    "The pain you feel today will be the strength you feel tomorrow.",
    "Push yourself, because no one else will.",
    "Great things never come from comfort zones.",
    "Success starts with self-discipline.",
    "Train like a beast, look like a beauty.",
    "Stronger every day.",
    "Small steps every day.",
    "Progress, not perfection.",
    "Your only limit is you.",
    "Believe in yourself.",
    "Make it happen.",
    "Fitness is not about being better than someone else. It's about being better than you used to be.",
    "The difference between try and triumph is a little umph.",
    "A one hour workout is 4% of your day. No excuses.",
    "You don't have to be great to start, but you have to start to be great.",
    "Take care of your body. It's the only place you have to live.",
];

pub fn quote_for_day(date: NaiveDate) -> &'static str {
    QUOTES[date.ordinal() as usize % QUOTES.len()]
}

pub fn peek_quote(repo: &impl Repository, today: NaiveDate) -> String {
    let last_date: String = repo.get(keys::LAST_QUOTE_DATE);
    if last_date != date_key(today) {
        return quote_for_day(today).to_string();
    }
    cached_quote(repo)
}

pub fn quote_of_the_day(repo: &mut impl Repository, today: NaiveDate) -> Result<String, AppError> {
    let today_key = date_key(today);
    let last_date: String = repo.get(keys::LAST_QUOTE_DATE);
    if last_date == today_key {
        return Ok(cached_quote(repo));
    }

    let quote = quote_for_day(today);
    repo.set(keys::TODAY_QUOTE, quote)?;
    repo.set(keys::LAST_QUOTE_DATE, &today_key)?;
    debug!(date = %today_key, "refreshed quote of the day");
    Ok(quote.to_string())
}

pub fn random_quote() -> &'static str {
    QUOTES.choose(&mut rand::rng()).copied().unwrap_or(QUOTES[0])
}

fn cached_quote(repo: &impl Repository) -> String {
    let quote: String = repo.get(keys::TODAY_QUOTE);
    if quote.is_empty() {
        QUOTES[0].to_string()
    } else {
        quote
    }
}

use event_scrape_lib::{EventScraper, ScrapeConfig, ScrapeError, Strategy};
use httpmock::prelude::*;

#[test]
fn sends_configured_user_agent() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/e/1")
            .header("user-agent", "EventScrape-Test/1.0");
        then.status(200)
            .header("content-type", "text/html; charset=utf-8")
            .body("<html><head><title>Lantern Parade</title></head><body></body></html>");
    });

    let config = ScrapeConfig::default().with_user_agent("EventScrape-Test/1.0");
    let scraper = EventScraper::new(&config).unwrap();
    let extraction = scraper.scrape_detailed(&server.url("/e/1")).unwrap();

    mock.assert();
    assert_eq!(extraction.strategy, Strategy::Generic);
    assert_eq!(extraction.record.event_name, "Lantern Parade");
    assert!(extraction.record.is_free);
}

#[test]
fn server_errors_surface_as_fetch_errors() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/broken");
        then.status(500);
    });

    let scraper = EventScraper::new(&ScrapeConfig::default()).unwrap();
    let err = scraper.scrape(&server.url("/broken")).unwrap_err();
    assert!(matches!(err, ScrapeError::Fetch(_)));
    assert!(err.to_string().contains("non-success status"));
}

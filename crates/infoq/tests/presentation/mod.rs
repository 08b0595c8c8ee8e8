use infoq::{DiskCache, InfoqError, Presentation, PresentationId};
use wiremock::MockServer;

use crate::common::{client_for, setup_mock_server, InfoqMock, PAGE, PRESENTATION_ID};

#[tokio::test]
async fn test_fetch_presentation() -> anyhow::Result<()> {
    let (client, mock_server) = setup_mock_server().await;

    let id: PresentationId = PRESENTATION_ID.parse()?;
    let presentation = Presentation::fetch(&client, id).await?;

    assert_eq!(presentation.title, "Batman.js: Rails-style Client-side Framework");
    assert_eq!(presentation.play_path, "mp4:presentations/batmanjs.mp4");
    assert_eq!(presentation.timecodes, vec![0, 50]);
    assert_eq!(
        presentation.slides[0].as_str(),
        format!("{}/resource/presentations/Batmanjs/sl1.swf", mock_server.uri())
    );
    Ok(())
}

#[tokio::test]
async fn test_url_and_id_resolve_the_same() -> anyhow::Result<()> {
    let (client, _mock_server) = setup_mock_server().await;

    let by_id = Presentation::fetch(&client, PRESENTATION_ID.parse()?).await?;
    let by_url = Presentation::fetch(
        &client,
        "http://www.infoq.com/presentations/Batmanjs".parse()?,
    )
    .await?;

    assert_eq!(by_id.id, by_url.id);
    assert_eq!(by_id.url, by_url.url);
    assert_eq!(by_id.slides, by_url.slides);
    Ok(())
}

#[tokio::test]
async fn test_missing_presentation() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);

    let result = Presentation::fetch(&client, "Unknown".parse()?).await;
    match result {
        Err(InfoqError::HttpError(status)) => assert_eq!(status, 404),
        other => panic!("unexpected result: {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_cached_fetch() -> anyhow::Result<()> {
    let cache_dir = tempfile::tempdir()?;
    let mock_server = MockServer::start().await;
    mock_server.mock("/presentations/Batmanjs", PAGE).await;

    let client = client_for(&mock_server).with_cache(DiskCache::new(cache_dir.path()));
    let url = Presentation::page_url(&client, &PRESENTATION_ID.parse()?)?;
    let first = client.fetch_text(&url).await?;

    // served from the cache once the server forgets the page
    mock_server.reset().await;
    let second = client.fetch_text(&url).await?;

    assert_eq!(first, second);
    assert!(DiskCache::new(cache_dir.path()).size().await? > 0);
    Ok(())
}

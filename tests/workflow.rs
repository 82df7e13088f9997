use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use qrcraft::{
    Color, Error, Outcome, PlatformIO, QrSymbolRenderer, QrWorkflow, RasterImage, Rasterizer,
    Result, Symbol, WorkflowOptions, WorkflowState,
};

struct MockRasterizer {
    calls: Arc<AtomicUsize>,
    fail: bool,
}

#[async_trait]
impl Rasterizer for MockRasterizer {
    async fn to_raster(&self, symbol: &Symbol) -> Result<RasterImage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Error::Rasterization("mock rasterizer failure".to_string()));
        }
        Ok(RasterImage::from_png(
            vec![0x89, b'P', b'N', b'G'],
            symbol.width(),
            symbol.height(),
        ))
    }
}

#[derive(Clone, Default)]
struct MockPlatform {
    saves: Arc<Mutex<Vec<String>>>,
    opened: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl PlatformIO for MockPlatform {
    async fn save(&self, _image: &RasterImage, filename: &str) -> Result<PathBuf> {
        self.saves.lock().unwrap().push(filename.to_string());
        Ok(PathBuf::from(filename))
    }

    fn open_external(&self, url: &str) -> Result<()> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

type TestWorkflow = QrWorkflow<QrSymbolRenderer, MockRasterizer, MockPlatform>;

fn harness(fail_rasterizer: bool) -> (TestWorkflow, Arc<AtomicUsize>, MockPlatform) {
    let calls = Arc::new(AtomicUsize::new(0));
    let platform = MockPlatform::default();
    let workflow = QrWorkflow::with_parts(
        QrSymbolRenderer::new(),
        MockRasterizer {
            calls: Arc::clone(&calls),
            fail: fail_rasterizer,
        },
        platform.clone(),
        WorkflowOptions::default(),
    )
    .expect("construct workflow");
    (workflow, calls, platform)
}

#[tokio::test]
async fn empty_payload_ignores_download_with_no_collaborator_calls() {
    let (mut workflow, calls, platform) = harness(false);

    workflow.set_payload("").unwrap();
    assert_eq!(workflow.state(), WorkflowState::Empty);
    assert!(workflow.symbol().is_none());

    let outcome = workflow.request_download().await.unwrap();
    assert_eq!(outcome, Outcome::Ignored);
    assert!(outcome.notice().is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(platform.saves.lock().unwrap().is_empty());
}

#[tokio::test]
async fn non_empty_payload_renders_a_symbol() {
    let (mut workflow, _, _) = harness(false);

    workflow.set_payload("hello").unwrap();
    assert_eq!(workflow.state(), WorkflowState::Ready);
    let symbol = workflow.symbol().expect("symbol rendered");
    assert_eq!(symbol.payload(), "hello");

    // Clearing the payload drops the symbol again
    workflow.set_payload("").unwrap();
    assert_eq!(workflow.state(), WorkflowState::Empty);
    assert!(workflow.symbol().is_none());
}

#[tokio::test]
async fn download_rasterizes_once_and_saves_under_fixed_filename() {
    let (mut workflow, calls, platform) = harness(false);

    workflow.set_payload("https://example.com").unwrap();
    let outcome = workflow.request_download().await.unwrap();

    assert!(matches!(outcome, Outcome::Saved { .. }));
    assert!(outcome.notice().unwrap().contains("qr-code.png"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(*platform.saves.lock().unwrap(), vec!["qr-code.png"]);
    assert_eq!(workflow.state(), WorkflowState::Ready);
}

#[tokio::test]
async fn color_edits_invalidate_the_export_image() {
    let (mut workflow, _, _) = harness(false);

    workflow.set_payload("hello").unwrap();
    workflow.request_share().await.unwrap();
    assert_eq!(workflow.state(), WorkflowState::Shareable);
    assert!(workflow.export_image().is_some());

    workflow.set_foreground(Color::RED).unwrap();
    assert_eq!(workflow.state(), WorkflowState::Ready);
    assert!(workflow.export_image().is_none());

    workflow.request_share().await.unwrap();
    workflow.set_background(Color::PINK).unwrap();
    assert!(workflow.export_image().is_none());
}

#[tokio::test]
async fn payload_edits_invalidate_the_export_image() {
    let (mut workflow, _, _) = harness(false);

    workflow.set_payload("hello").unwrap();
    workflow.request_share().await.unwrap();
    assert!(workflow.export_image().is_some());

    workflow.set_payload("goodbye").unwrap();
    assert_eq!(workflow.state(), WorkflowState::Ready);
    assert!(workflow.export_image().is_none());
}

#[tokio::test]
async fn randomized_colors_stay_within_the_palettes() {
    let (mut workflow, _, _) = harness(false);
    workflow.set_payload("hello").unwrap();

    let mut seen_fg = Vec::new();
    let mut seen_bg = Vec::new();
    for _ in 0..500 {
        let (fg, bg) = workflow.randomize_colors().unwrap();
        assert!(workflow.palette().foreground.contains(&fg));
        assert!(workflow.palette().background.contains(&bg));
        assert_eq!(workflow.foreground(), fg);
        assert_eq!(workflow.background(), bg);
        if !seen_fg.contains(&fg) {
            seen_fg.push(fg);
        }
        if !seen_bg.contains(&bg) {
            seen_bg.push(bg);
        }
    }

    // Over many draws every palette entry shows up
    assert_eq!(seen_fg.len(), workflow.palette().foreground.len());
    assert_eq!(seen_bg.len(), workflow.palette().background.len());
}

#[tokio::test]
async fn randomizing_clears_a_prepared_share() {
    let (mut workflow, _, _) = harness(false);

    workflow.set_payload("hello").unwrap();
    workflow.request_share().await.unwrap();
    assert!(workflow.export_image().is_some());

    workflow.randomize_colors().unwrap();
    assert!(workflow.export_image().is_none());
    assert_eq!(workflow.state(), WorkflowState::Ready);
}

#[tokio::test]
async fn facebook_share_opens_one_encoded_deep_link() {
    let (mut workflow, calls, platform) = harness(false);

    workflow.set_payload("hello").unwrap();
    workflow.request_share().await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let reference = workflow.export_image().unwrap().reference.clone();
    let outcome = workflow.share_via("facebook").unwrap();

    let opened = platform.opened.lock().unwrap();
    assert_eq!(opened.len(), 1);
    assert!(opened[0].contains(urlencoding::encode(&reference).as_ref()));
    assert!(opened[0].contains(urlencoding::encode("Check out this QR code!").as_ref()));
    assert!(matches!(outcome, Outcome::Opened { url, .. } if url == opened[0]));
}

#[tokio::test]
async fn instagram_share_never_navigates() {
    let (mut workflow, _, platform) = harness(false);

    // Manual-share guidance applies even with no prepared export image
    workflow.set_payload("hello").unwrap();
    let outcome = workflow.share_via("instagram").unwrap();
    assert!(matches!(outcome, Outcome::ManualShareRequired { .. }));

    workflow.request_share().await.unwrap();
    let outcome = workflow.share_via("instagram").unwrap();
    assert!(matches!(outcome, Outcome::ManualShareRequired { .. }));
    assert!(outcome.notice().unwrap().contains("manually"));

    assert!(platform.opened.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_platform_is_rejected_without_navigation() {
    let (mut workflow, _, platform) = harness(false);

    workflow.set_payload("hello").unwrap();
    workflow.request_share().await.unwrap();

    let err = workflow.share_via("myspace").unwrap_err();
    assert!(matches!(err, Error::PlatformNotRecognized(_)));
    assert!(platform.opened.lock().unwrap().is_empty());
}

#[tokio::test]
async fn share_without_prepared_export_is_ignored() {
    let (mut workflow, _, platform) = harness(false);

    workflow.set_payload("hello").unwrap();
    let outcome = workflow.share_via("telegram").unwrap();
    assert_eq!(outcome, Outcome::Ignored);
    assert!(platform.opened.lock().unwrap().is_empty());
}

#[tokio::test]
async fn rasterizer_failure_returns_to_ready_without_saving() {
    let (mut workflow, calls, platform) = harness(true);

    workflow.set_payload("hello").unwrap();
    let err = workflow.request_download().await.unwrap_err();

    assert!(matches!(err, Error::Rasterization(_)));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(platform.saves.lock().unwrap().is_empty());
    assert_eq!(workflow.state(), WorkflowState::Ready);

    let err = workflow.request_share().await.unwrap_err();
    assert!(matches!(err, Error::Rasterization(_)));
    assert_eq!(workflow.state(), WorkflowState::Ready);
    assert!(workflow.export_image().is_none());
}

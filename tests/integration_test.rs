#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use doglink::{
        AppConfig, AssetLocator, AssetProvider, DoglinkError, LoadFailure,
        LoadTicket, Permalink, PopupFeatures, PopupLauncher,
        PresentationController, PresentationSink, PresentationState, Region,
        ShareLinkDispatcher, SharePlatform, SinkSignal,
    };
    use std::cell::RefCell;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use url::Url;

    const RANDOM: &str =
        "https://images.dog.ceo/breeds/retriever-golden/n02099601_3004.jpg";

    #[derive(Default)]
    struct FixedProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl AssetProvider for FixedProvider {
        async fn random_locator(&self) -> doglink::Result<AssetLocator> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            AssetLocator::parse(RANDOM)
        }
    }

    #[derive(Default)]
    struct PageSink {
        main_visible: bool,
        loading_visible: bool,
        image: Option<(String, LoadTicket)>,
        breed: String,
        anchor: String,
        failure: Option<String>,
    }

    impl PresentationSink for PageSink {
        fn show(&mut self, region: Region) {
            match region {
                Region::MainContent => self.main_visible = true,
                Region::Loading => self.loading_visible = true,
            }
        }

        fn hide(&mut self, region: Region) {
            match region {
                Region::MainContent => self.main_visible = false,
                Region::Loading => self.loading_visible = false,
            }
        }

        fn set_image_source(
            &mut self,
            locator: &AssetLocator,
            ticket: LoadTicket,
        ) {
            self.image = Some((locator.to_string(), ticket));
        }

        fn set_breed_label(&mut self, breed: &str) {
            self.breed = breed.to_owned();
        }

        fn set_permalink(&mut self, permalink: &Permalink) {
            self.anchor = permalink.to_string();
        }

        fn show_failure(&mut self, failure: &LoadFailure) {
            self.failure = Some(failure.to_string());
        }
    }

    #[derive(Default)]
    struct Popups {
        opened: RefCell<Vec<String>>,
    }

    impl PopupLauncher for Popups {
        fn open(&self, url: &Url, _target: &str, _features: &PopupFeatures) {
            self.opened.borrow_mut().push(url.to_string());
        }
    }

    fn config(page: &str) -> AppConfig {
        let mut config = AppConfig::default();
        config.set_page_address(page).unwrap();
        config
    }

    #[tokio::test]
    async fn pinned_page_resolves_without_network() {
        let config = config("https://pups.example/gallery/?id=terrier");
        let mut controller = PresentationController::from_config(
            PageSink::default(),
            FixedProvider::default(),
            &config,
        );

        let ticket = controller.load(false).await.unwrap();
        assert_eq!(
            controller.current_locator().unwrap().as_str(),
            "https://images.dog.ceo/breeds/terrier"
        );
        assert_eq!(
            controller
                .resolver()
                .provider()
                .calls
                .load(Ordering::SeqCst),
            0
        );
        assert!(controller.sink().loading_visible);
        assert!(!controller.sink().main_visible);

        let (_, rendered) = controller.sink().image.clone().unwrap();
        controller.handle_signal(rendered, SinkSignal::Loaded);
        assert_eq!(rendered, ticket);

        let sink = controller.sink();
        assert_eq!(controller.state(), PresentationState::Ready);
        assert!(sink.main_visible);
        assert!(!sink.loading_visible);
        assert_eq!(sink.breed, "terrier");
        assert_eq!(sink.anchor, "https://pups.example/gallery/?id=terrier");
    }

    #[tokio::test]
    async fn random_permalink_reopens_the_same_image() {
        let config = config("https://pups.example/");
        let mut controller = PresentationController::from_config(
            PageSink::default(),
            FixedProvider::default(),
            &config,
        );
        controller.load(false).await.unwrap();
        let permalink = controller.permalink().unwrap();

        let reopened = AppConfig {
            page_address: permalink.as_url().clone(),
            ..AppConfig::default()
        };
        let mut second = PresentationController::from_config(
            PageSink::default(),
            FixedProvider::default(),
            &reopened,
        );
        second.load(false).await.unwrap();

        assert_eq!(second.current_locator().unwrap().as_str(), RANDOM);
        assert_eq!(
            second.resolver().provider().calls.load(Ordering::SeqCst),
            0
        );
        assert_eq!(second.permalink().unwrap(), permalink);
    }

    #[tokio::test]
    async fn broken_identifier_ends_in_error_state() {
        let config = config("https://pups.example/?id=no-such-breed");
        let mut controller = PresentationController::from_config(
            PageSink::default(),
            FixedProvider::default(),
            &config,
        );

        let ticket = controller.load(false).await.unwrap();
        controller.handle_signal(ticket, SinkSignal::Failed);

        assert_eq!(controller.state(), PresentationState::Error);
        assert_eq!(
            controller.sink().failure.as_deref(),
            Some("Error: Failed loading the requested image! (no-such-breed)")
        );
        assert!(controller.sink().loading_visible);
    }

    #[tokio::test]
    async fn sharing_reads_the_latest_resolution() {
        let config = config("https://pups.example/?id=terrier");
        let mut controller = PresentationController::from_config(
            PageSink::default(),
            FixedProvider::default(),
            &config,
        );
        let dispatcher = ShareLinkDispatcher::new(Popups::default());

        assert!(!dispatcher
            .share_current(SharePlatform::Twitter, &controller)
            .unwrap());

        controller.load(false).await.unwrap();
        controller.handle_key('r').await.unwrap();
        assert!(dispatcher
            .share_current(SharePlatform::Facebook, &controller)
            .unwrap());

        let opened = dispatcher.launcher().opened.borrow();
        assert_eq!(opened.len(), 1);
        assert!(opened[0].contains("retriever-golden"));
    }

    #[test]
    fn shared_links_do_not_accept_foreign_locators() {
        assert!(matches!(
            doglink::extract_identifier("https://images.dog.ceo/notbreeds/x"),
            Err(DoglinkError::MalformedLocator(_))
        ));
    }
}

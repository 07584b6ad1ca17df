/// Fullscreen entry points, in the order they are tried.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FullscreenApi {
    Standard,
    Webkit,
    Ms,
}

impl FullscreenApi {
    pub const FALLBACK_ORDER: [FullscreenApi; 3] =
        [FullscreenApi::Standard, FullscreenApi::Webkit, FullscreenApi::Ms];
}

/// The embedded browser view. Hidden behind a placeholder until a run starts.
#[derive(Clone, Debug)]
pub struct BrowserFrame {
    visible: bool,
    src: Option<String>,
    loads: u32,
    fullscreen: Option<FullscreenApi>,
    supported: Vec<FullscreenApi>,
}

impl Default for BrowserFrame {
    fn default() -> Self {
        Self::with_support(FullscreenApi::FALLBACK_ORDER.to_vec())
    }
}

impl BrowserFrame {
    pub fn with_support(supported: Vec<FullscreenApi>) -> Self {
        Self {
            visible: false,
            src: None,
            loads: 0,
            fullscreen: None,
            supported,
        }
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn navigate(&mut self, url: &str) {
        self.src = Some(url.to_string());
        self.loads += 1;
    }

    /// Reloads the current address. Does nothing before the first navigation.
    pub fn refresh(&mut self) -> bool {
        if self.src.is_none() {
            return false;
        }
        self.loads += 1;
        true
    }

    pub fn request_fullscreen(&mut self) -> Option<FullscreenApi> {
        let api = FullscreenApi::FALLBACK_ORDER
            .into_iter()
            .find(|api| self.supported.contains(api))?;
        self.fullscreen = Some(api);
        Some(api)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }

    pub fn loads(&self) -> u32 {
        self.loads
    }

    pub fn fullscreen(&self) -> Option<FullscreenApi> {
        self.fullscreen
    }
}

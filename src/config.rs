
/// Web3Forms accepts submissions from localhost too, so every build posts here.
pub const FORM_ENDPOINT: &str = "https://api.web3forms.com/submit";

/// Viewports matching this query get no pointer effects.
pub const NARROW_VIEWPORT_QUERY: &str = "(max-width: 768px)";

/// Page offset after which the nav switches to its compact look.
pub const NAV_SCROLLED_THRESHOLD: f64 = 50.0;

pub const MODAL_FOCUS_DELAY_MS: u32 = 300;
pub const MODAL_RESET_DELAY_MS: u32 = 300;
pub const RIPPLE_DURATION_MS: u32 = 600;

pub const HERO_INTRO_BASE_DELAY_MS: u32 = 200;
pub const HERO_INTRO_STEP_MS: u32 = 150;

pub const SUBMIT_FALLBACK_MESSAGE: &str =
    "Something went wrong. Please try again or DM on Instagram.";

pub const SUBMIT_SENDING_LABEL: &str = "<span>Sending...</span>";

pub const SUBMIT_DEFAULT_LABEL: &str = r#"
            <span>Send Request</span>
            <svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
                <path d="M22 2L11 13"/>
                <path d="M22 2l-7 20-4-9-9-4 20-7z"/>
            </svg>
        "#;

pub const REVEAL_SELECTOR: &str = ".section-header, .about-card, .about-visual, .service-card, \
     .project-card, .process-step, .pricing-card, .pricing-custom, \
     .cta-content, .footer-content";

pub const GRID_CONTAINER_CLASSES: [&str; 4] = [
    "services-grid",
    "projects-grid",
    "pricing-grid",
    "process-timeline",
];

pub const TILT_CARD_SELECTOR: &str = ".service-card, .project-card, .pricing-card";

pub const SECTION_SELECTOR: &str = "section[id]";
pub const NAV_LINK_SELECTOR: &str = ".nav-links a, .mobile-menu a";

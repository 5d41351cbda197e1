/// Keys the page reacts to. Anything else never reaches the dispatcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    ArrowLeft,
    ArrowRight,
    Space,
    PageDown,
    PageUp,
    Home,
    End,
    Escape,
}

/// What a key press should do, before bounds are applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavCommand {
    NextSection,
    PrevSection,
    FirstSection,
    LastSection,
    CarouselPrev,
    CarouselNext,
    CloseModal,
}

/// The gates a key press has to clear, in order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyContext {
    pub images_ready: bool,
    pub typing: bool,
    pub modal_open: bool,
    pub models_active: bool,
}

/// Translate a key press under the current gates. Nothing fires before the
/// frames are in or while typing; an open modal swallows everything except
/// Escape; the carousel keys only work while the models section is active.
pub fn dispatch(key: Key, ctx: &KeyContext) -> Option<NavCommand> {
    if !ctx.images_ready || ctx.typing {
        return None;
    }
    if ctx.modal_open {
        return match key {
            Key::Escape => Some(NavCommand::CloseModal),
            _ => None,
        };
    }
    match key {
        Key::ArrowDown | Key::Space | Key::PageDown => Some(NavCommand::NextSection),
        Key::ArrowUp | Key::PageUp => Some(NavCommand::PrevSection),
        Key::Home => Some(NavCommand::FirstSection),
        Key::End => Some(NavCommand::LastSection),
        Key::ArrowLeft if ctx.models_active => Some(NavCommand::CarouselPrev),
        Key::ArrowRight if ctx.models_active => Some(NavCommand::CarouselNext),
        Key::ArrowLeft | Key::ArrowRight | Key::Escape => None,
    }
}

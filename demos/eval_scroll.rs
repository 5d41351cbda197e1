use strada::{Choreographer, Viewport, present, showcase_page, solve_layout};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let page = showcase_page();
    let viewport = Viewport::new(1280.0, 720.0)?;
    let layout = solve_layout(&page, viewport)?;

    let mut choreo = Choreographer::new();
    present::install_all(&mut choreo, &layout, viewport)?;

    for scroll in [0.0, 500.0, 2500.0, layout.scroll_limit / 2.0, layout.scroll_limit] {
        choreo.tick(1.0 / 60.0, scroll, &layout);
        let state = choreo.evaluate(scroll);
        println!("scroll {scroll:>8.1}: {} targets", state.targets.len());
    }

    Ok(())
}

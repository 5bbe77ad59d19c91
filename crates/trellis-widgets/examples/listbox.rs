//! Drive a list box with navigation intents and print what the native
//! surface would be asked to draw.
//!
//! Run with `cargo run --example listbox`.

use trellis_core::{
    NavIntent, Result,
    testing::{Harness, TestSurface},
};
use trellis_widgets::{Label, ListBox, SelectionChanged};

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let mut h = Harness::builder(ListBox::new()).size(160, 48).build()?;
    let root = h.root();

    h.with_control::<ListBox, _>(root, |_, lb| {
        lb.selection_changed().subscribe(|c: &SelectionChanged| {
            println!("selection: {} -> {}", c.old, c.new);
        })
    });

    for (text, selectable) in [
        ("Temperature", true),
        ("Humidity", true),
        ("---", false),
        ("Pressure", true),
        ("Battery", true),
        ("---", false),
        ("About", true),
    ] {
        h.with_control::<ListBox, _>(root, |tree, lb| {
            lb.append_item(tree, Label::new(text).with_selectable(selectable))
        })?;
    }

    // Walk down through the list; separators are skipped and the viewport
    // follows the selection.
    for _ in 0..5 {
        h.nav(root, NavIntent::MoveSelectionDown)?;
    }

    h.render()?;
    println!("\nelement tree:\n{}", h.tree.dump());
    print_surface(&h.surface);
    Ok(())
}

/// Print the operations recorded by the test surface.
fn print_surface(surface: &TestSurface) {
    println!("surface operations:");
    for op in &surface.ops {
        println!("  {op:?}");
    }
    for region in &surface.flushed {
        println!("  flushed {region:?}");
    }
}

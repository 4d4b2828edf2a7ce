use super::view_model::OrderEditorViewModel;
use crate::shared::dom;
use crate::shared::icons::icon;
use contracts::domain::a001_sales_order::{LineKey, StockStatus, CURRENCY_LABEL};
use contracts::shared::number_format::format_currency;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Fade-out before a removed row leaves the DOM
const REMOVE_FADE_MS: u32 = 300;

#[component]
pub fn OrderLineEditor(
    vm: OrderEditorViewModel,
    #[prop(into)] qty_placeholder: String,
    #[prop(into)] product_placeholder: String,
    /// Render an "Add Item" button (the page may provide its own `#addItem`)
    #[prop(optional)]
    show_add_button: bool,
) -> impl IntoView {
    // The summary block and loading badge belong to the page template
    Effect::new(move |_| {
        let summary = vm.summary.get();
        dom::set_text_by_id("orderSubtotal", &format_currency(summary.subtotal));
        dom::set_text_by_id("orderDiscount", &format_currency(summary.discount));
        dom::set_text_by_id("orderGrandTotal", &format_currency(summary.grand_total));
    });
    Effect::new(move |_| {
        dom::toggle_class_by_id("priceLoading", "d-none", !vm.is_loading());
    });

    let qty_placeholder = StoredValue::new(qty_placeholder);
    let product_placeholder = StoredValue::new(product_placeholder);

    view! {
        <div class="order-lines">
            <For
                each=move || vm.keys()
                key=|line_key| *line_key
                children=move |line_key| {
                    view! {
                        <OrderLineRow
                            vm=vm
                            line_key=line_key
                            qty_placeholder=qty_placeholder.get_value()
                            product_placeholder=product_placeholder.get_value()
                        />
                    }
                }
            />
        </div>
        <Show when=move || show_add_button>
            <div class="d-flex align-items-center gap-2 mt-2">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.add_line()>
                    {icon("plus")}
                    " Add Item"
                </Button>
                <Show when=move || vm.is_loading()>
                    <Spinner size=SpinnerSize::Tiny />
                </Show>
            </div>
        </Show>
    }
}

#[component]
fn StockHint(status: Memo<StockStatus>) -> impl IntoView {
    view! {
        <small class=move || format!("text-muted stock-hint d-block mt-1 {}", status.get().hint_class())>
            {move || {
                let current = status.get();
                match current {
                    StockStatus::NoStockInfo => None,
                    StockStatus::Insufficient { .. } => Some(view! {
                        <span>{icon("alert")}" "{current.hint_text()}</span>
                    }.into_any()),
                    _ => Some(view! {
                        <span>{icon("box")}" "{current.hint_text()}</span>
                    }.into_any()),
                }
            }}
        </small>
    }
}

#[component]
fn OrderLineRow(
    vm: OrderEditorViewModel,
    line_key: LineKey,
    qty_placeholder: String,
    product_placeholder: String,
) -> impl IntoView {
    let removing = RwSignal::new(false);
    let status = Memo::new(move |_| vm.stock_status(line_key));

    let on_remove = move |_: leptos::ev::MouseEvent| {
        if !vm.can_remove() {
            return;
        }
        removing.set(true);
        spawn_local(async move {
            TimeoutFuture::new(REMOVE_FADE_MS).await;
            vm.remove_line(line_key);
            // Another row got there first and this one is now the last
            if vm.lines.with_untracked(|l| l.get(line_key).is_some()) {
                let _ = removing.try_set(false);
            }
        });
    };

    let row_style = move || {
        if removing.get() {
            "transition: opacity 0.3s; opacity: 0;"
        } else {
            "transition: opacity 0.3s; opacity: 1;"
        }
    };

    view! {
        <div class="row mb-3 align-items-start item-row p-3 bg-light rounded border" style=row_style>
            <div class="col-md-5">
                <label class="form-label small fw-semibold d-md-none">"Product"</label>
                <select
                    name="product_id"
                    class="form-select product-select"
                    on:change=move |ev| vm.set_product(line_key, event_target_value(&ev))
                >
                    <option value="" prop:selected=move || vm.product_value(line_key).is_empty()>
                        {product_placeholder}
                    </option>
                    <For
                        each=move || vm.option_labels.get()
                        key=|(value, label)| (value.clone(), label.clone())
                        children=move |(value, label)| {
                            let option_value = value.clone();
                            let is_selected = move || vm.product_value(line_key) == option_value;
                            view! {
                                <option value=value prop:selected=is_selected>
                                    {label}
                                </option>
                            }
                        }
                    />
                </select>
                <StockHint status=status />
            </div>
            <div class="col-md-2">
                <label class="form-label small fw-semibold d-md-none">"Quantity"</label>
                <input
                    type="number"
                    name="quantity"
                    min="1"
                    class=move || format!("form-control qty-input {}", status.get().input_class())
                    placeholder=qty_placeholder
                    prop:value=move || vm.quantity_input(line_key)
                    on:input=move |ev| vm.set_quantity(line_key, event_target_value(&ev))
                />
            </div>
            <div class="col-md-3">
                <label class="form-label small fw-semibold d-md-none">"Total"</label>
                <div class="input-group">
                    <input
                        type="text"
                        class="form-control row-total bg-white"
                        readonly=true
                        prop:value=move || format_currency(vm.line_total(line_key))
                    />
                    <span class="input-group-text bg-white">{CURRENCY_LABEL}</span>
                </div>
            </div>
            <div class="col-md-2 text-end">
                <label class="form-label small invisible d-md-none">"Remove"</label>
                <button
                    type="button"
                    class=move || {
                        if vm.can_remove() {
                            "btn btn-outline-danger remove-item"
                        } else {
                            "btn btn-outline-danger remove-item d-none"
                        }
                    }
                    title="Remove"
                    on:click=on_remove
                >
                    {icon("trash")}
                </button>
            </div>
        </div>
    }
}

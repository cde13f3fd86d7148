//! Store page, search, product panel and cart fragments.

use axum::http::StatusCode;
use spicebox_integration_tests::TestContext;

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new();
    let resp = ctx.get("/health").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, "ok");
}

#[tokio::test]
async fn test_store_page_renders_empty_cart() {
    let ctx = TestContext::new();
    let resp = ctx.get("/").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("<h1>Premium Cumin Seeds</h1>"));
    assert!(resp.body.contains("₹199.00"));
    assert!(resp.body.contains("Your cart is empty. Try adding the Premium Cumin Seeds!"));
    assert!(resp.body.contains(r#"<span id="total-price">₹0.00</span>"#));
    assert!(resp.body.contains(">Account</a>"));
    assert!(resp.body.contains(r#"class="modal""#));
}

#[tokio::test]
async fn test_add_same_variant_twice_merges_lines() {
    let ctx = TestContext::new();

    let first = ctx.post("/cart/add", "variant=250g").await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(
        first.notices(),
        ["250g of Premium Cumin Seeds added to cart!"]
    );
    assert!(first.cart_updated());

    let second = ctx.post("/cart/add", "variant=250g").await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.body.matches(r#"class="cart-item""#).count(), 1);
    assert!(second.body.contains(r#"value="2""#));
    assert!(second.body.contains(r#"<span id="subtotal">₹900.00</span>"#));
    assert!(second.body.contains(r#"<span id="discount">₹0.00</span>"#));
    assert!(second.body.contains(r#"<span id="total-price">₹900.00</span>"#));

    let count = ctx.get("/cart/count").await;
    assert!(count.body.contains(">1</span>"));
}

#[tokio::test]
async fn test_lines_keep_insertion_order() {
    let ctx = TestContext::new();
    ctx.post("/cart/add", "variant=500g").await;
    ctx.post("/cart/add", "variant=100g").await;
    let resp = ctx.post("/cart/add", "variant=500g").await;

    let big = resp.body.find("line-cumin-001-500g").unwrap_or(usize::MAX);
    let small = resp.body.find("line-cumin-001-100g").unwrap_or(0);
    assert!(big < small);
    assert!(resp.body.contains("2 items"));
    assert!(resp.body.contains(r#"<span id="total-price">₹1799.00</span>"#));
}

#[tokio::test]
async fn test_unknown_variant_is_not_found() {
    let ctx = TestContext::new();
    let resp = ctx.post("/cart/add", "variant=1kg").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);

    let cart = ctx.get("/cart").await;
    assert!(cart.body.contains("Your cart is empty."));
}

#[tokio::test]
async fn test_update_quantity() {
    let ctx = TestContext::new();
    ctx.post("/cart/add", "variant=250g").await;

    let resp = ctx.post("/cart/update", "index=0&quantity=3").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.cart_updated());
    assert!(resp.body.contains(r#"value="3""#));
    assert!(resp.body.contains(r#"<span id="total-price">₹1350.00</span>"#));
}

#[tokio::test]
async fn test_invalid_quantity_is_reverted_silently() {
    let ctx = TestContext::new();
    ctx.post("/cart/add", "variant=250g").await;
    ctx.post("/cart/update", "index=0&quantity=2").await;

    for bad in ["0", "-4", "abc", "", "0.5"] {
        let resp = ctx
            .post("/cart/update", &format!("index=0&quantity={bad}"))
            .await;
        assert_eq!(resp.status, StatusCode::OK, "quantity {bad:?}");
        assert!(resp.notices().is_empty(), "quantity {bad:?}");
        assert!(!resp.cart_updated(), "quantity {bad:?}");
        assert!(resp.body.contains(r#"value="2""#), "quantity {bad:?}");
        assert!(
            resp.body.contains(r#"<span id="total-price">₹900.00</span>"#),
            "quantity {bad:?}"
        );
    }
}

#[tokio::test]
async fn test_fractional_quantity_keeps_whole_part() {
    let ctx = TestContext::new();
    ctx.post("/cart/add", "variant=250g").await;

    let resp = ctx.post("/cart/update", "index=0&quantity=2.5").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.cart_updated());
    assert!(resp.body.contains(r#"value="2""#));
    assert!(resp.body.contains(r#"<span id="total-price">₹900.00</span>"#));
}

#[tokio::test]
async fn test_remove_item() {
    let ctx = TestContext::new();
    ctx.post("/cart/add", "variant=100g").await;
    ctx.post("/cart/add", "variant=500g").await;

    let resp = ctx.post("/cart/remove", "index=0").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.cart_updated());
    assert!(!resp.body.contains("line-cumin-001-100g"));
    assert!(resp.body.contains("line-cumin-001-500g"));
    assert!(resp.body.contains(r#"<span id="total-price">₹800.00</span>"#));

    let resp = ctx.post("/cart/remove", "index=0").await;
    assert!(resp.body.contains("Your cart is empty."));
}

#[tokio::test]
async fn test_bad_line_index_is_rejected() {
    let ctx = TestContext::new();
    ctx.post("/cart/add", "variant=100g").await;

    let resp = ctx.post("/cart/remove", "index=5").await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    let resp = ctx.post("/cart/remove", "index=first").await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    let resp = ctx.post("/cart/update", "index=1&quantity=2").await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let count = ctx.get("/cart/count").await;
    assert!(count.body.contains(">1</span>"));
}

#[tokio::test]
async fn test_promo_code_does_not_change_totals() {
    let ctx = TestContext::new();
    ctx.post("/cart/add", "variant=250g").await;

    let resp = ctx.post("/cart/promo", "code=save10").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("promo-status success"));
    assert!(resp.body.contains("Coupon SAVE10 applied! You would save 10% in a real application."));

    let resp = ctx.post("/cart/promo", "code=FREESHIP").await;
    assert!(!resp.body.contains("success"));
    assert!(resp.body.contains("Invalid promo code."));

    let cart = ctx.get("/cart").await;
    assert!(cart.body.contains(r#"<span id="discount">₹0.00</span>"#));
    assert!(cart.body.contains(r#"<span id="total-price">₹450.00</span>"#));
}

#[tokio::test]
async fn test_search_suggestions() {
    let ctx = TestContext::new();

    let resp = ctx.get("/search/suggest?q=CU").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(r#"data-term="cumin""#));
    assert!(!resp.body.contains("No products found."));

    let resp = ctx.get("/search/suggest?q=n").await;
    for term in ["lentils", "cumin", "cinnamon"] {
        assert!(resp.body.contains(term), "{term}");
    }
    assert!(!resp.body.contains("rice"));
    assert!(!resp.body.contains("combo pack"));

    let resp = ctx.get("/search/suggest?q=saffron").await;
    assert!(resp.body.contains("No products found."));

    let resp = ctx.get("/search/suggest?q=").await;
    assert!(!resp.body.contains("<li"));
}

#[tokio::test]
async fn test_variant_price_display() {
    let ctx = TestContext::new();

    let resp = ctx.get("/product/variant?variant=500g").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("₹800.00"));

    let page = ctx.get("/").await;
    assert!(page.body.contains(r#"<option value="500g" selected>"#));

    let resp = ctx.get("/product/variant?variant=2kg").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_thumbnail_swaps_main_image() {
    let ctx = TestContext::new();

    let resp = ctx.post("/product/thumbnail", "index=1").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("thumbnail active"));
    let main_image = resp
        .body
        .split(r#"class="main-image""#)
        .nth(1)
        .and_then(|rest| rest.split('>').next())
        .unwrap_or_default();
    assert!(main_image.contains("text=Back\""), "{main_image}");

    let resp = ctx.post("/product/thumbnail", "index=9").await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

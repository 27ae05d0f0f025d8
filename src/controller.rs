/// Subscription page editing and public form endpoints
pub mod subscription_pages;

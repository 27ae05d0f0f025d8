mod health_check;
mod helpers;
mod subscription_pages;

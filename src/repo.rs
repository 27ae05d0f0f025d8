mod mailing_lists;
mod subscription_pages;

pub use mailing_lists::MailingListRepo;
pub use subscription_pages::SubscriptionPageRepo;

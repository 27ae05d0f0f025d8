mod mailing_list;
mod page;
mod recipient;
mod subscription_page;

pub use mailing_list::{MailingList, MailingListSource};
pub use page::Page;
pub use recipient::{Recipient, RecipientFieldSource};
pub use subscription_page::{NewSubscriptionPage, SubscriptionPage, SubscriptionSettings};

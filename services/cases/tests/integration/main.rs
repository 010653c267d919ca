mod helpers;

mod case_test;
mod document_test;
mod router_test;

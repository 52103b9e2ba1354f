mod fixture;
mod main_test;

mod bil_tests;
mod select_tests;

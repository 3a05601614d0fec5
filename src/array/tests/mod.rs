mod lazy_tests;
mod pixel_tests;
